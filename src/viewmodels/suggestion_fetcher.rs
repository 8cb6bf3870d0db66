// ============================================================================
// SUGGESTION FETCHER - Máquina de estados del autocompletado (sin timers)
// ============================================================================
// Idle -> Debouncing -> Loading -> Settled
//
// `edit` reinicia el debounce en cada tecla, `fire` emite un ticket solo para
// la última generación y `settle` descarta respuestas con un `seq` antiguo.
// Los timers y el HTTP viven en AutocompleteViewModel.
// ============================================================================

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::utils::constants::{FALLBACK_CANDIDATE_COUNT, MAWB_FALLBACK_PREFIX};

/// Configuración por campo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetcherConfig {
    pub min_chars: usize,
    pub debounce_ms: u32,
    /// Prefijo de candidatos sintéticos; `None` = sin fallback
    pub fallback_prefix: Option<&'static str>,
}

impl FetcherConfig {
    pub fn mawb() -> Self {
        Self {
            min_chars: CONFIG.suggestion_config.min_chars,
            debounce_ms: CONFIG.suggestion_config.debounce_ms,
            fallback_prefix: Some(MAWB_FALLBACK_PREFIX),
        }
    }

    pub fn flights() -> Self {
        Self {
            min_chars: CONFIG.suggestion_config.min_chars,
            debounce_ms: CONFIG.suggestion_config.debounce_ms,
            fallback_prefix: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Debouncing,
    Loading,
    Settled,
}

/// Qué debe hacer el caller con el timer de debounce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceAction {
    /// Query demasiado corta: no programar nada
    Cancel,
    Schedule { generation: u64, delay_ms: u32 },
}

/// Request emitida; `seq` crece monótonamente
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FallbackReason {
    Unreachable(ApiError),
    EmptyRemote,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SuggestionOutcome {
    Remote(Vec<String>),
    Fallback {
        candidates: Vec<String>,
        reason: FallbackReason,
    },
    /// Fallo sin fallback sintético (vuelos)
    Unavailable(ApiError),
}

impl SuggestionOutcome {
    pub fn candidates(&self) -> &[String] {
        match self {
            SuggestionOutcome::Remote(list) => list,
            SuggestionOutcome::Fallback { candidates, .. } => candidates,
            SuggestionOutcome::Unavailable(_) => &[],
        }
    }

    /// El backend no respondió (la vista muestra un aviso "offline")
    pub fn is_offline(&self) -> bool {
        matches!(
            self,
            SuggestionOutcome::Fallback {
                reason: FallbackReason::Unreachable(_),
                ..
            } | SuggestionOutcome::Unavailable(_)
        )
    }
}

pub struct SuggestionFetcher {
    config: FetcherConfig,
    phase: FetchPhase,
    query: String,
    generation: u64,
    pending: Option<u64>,
    next_seq: u64,
    in_flight: Option<u64>,
    outcome: Option<SuggestionOutcome>,
}

impl SuggestionFetcher {
    pub fn new(config: FetcherConfig) -> Self {
        Self {
            config,
            phase: FetchPhase::Idle,
            query: String::new(),
            generation: 0,
            pending: None,
            next_seq: 0,
            in_flight: None,
            outcome: None,
        }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn outcome(&self) -> Option<&SuggestionOutcome> {
        self.outcome.as_ref()
    }

    pub fn suggestions(&self) -> &[String] {
        self.outcome.as_ref().map(|o| o.candidates()).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// Nueva edición del usuario. Invalida cualquier debounce pendiente y
    /// cualquier request en vuelo.
    pub fn edit(&mut self, query: &str) -> DebounceAction {
        self.query = query.to_string();
        self.generation += 1;
        self.in_flight = None;

        if query.trim().chars().count() < self.config.min_chars {
            self.pending = None;
            self.outcome = None;
            self.phase = FetchPhase::Idle;
            return DebounceAction::Cancel;
        }

        self.pending = Some(self.generation);
        self.phase = FetchPhase::Debouncing;
        DebounceAction::Schedule {
            generation: self.generation,
            delay_ms: self.config.debounce_ms,
        }
    }

    /// El timer de la generación `generation` venció
    pub fn fire(&mut self, generation: u64) -> Option<SuggestionTicket> {
        if self.pending != Some(generation) {
            return None;
        }
        self.pending = None;
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        self.phase = FetchPhase::Loading;
        Some(SuggestionTicket {
            seq: self.next_seq,
            query: self.query.trim().to_string(),
        })
    }

    /// Aplicar el resultado de un ticket. Devuelve `false` si es obsoleto.
    pub fn settle(&mut self, ticket: &SuggestionTicket, outcome: SuggestionOutcome) -> bool {
        if self.in_flight != Some(ticket.seq) {
            log::debug!("🗑️ [AUTOCOMPLETE] Respuesta obsoleta descartada (seq {})", ticket.seq);
            return false;
        }
        self.in_flight = None;
        self.outcome = Some(outcome);
        self.phase = FetchPhase::Settled;
        true
    }

    /// El usuario eligió un valor: se fija la query y se cierra la lista
    pub fn select(&mut self, value: &str) {
        self.query = value.to_string();
        self.generation += 1;
        self.pending = None;
        self.in_flight = None;
        self.outcome = None;
        self.phase = FetchPhase::Idle;
    }
}

/// Convertir el resultado de red en un outcome según la política del campo
pub fn resolve_outcome(
    config: &FetcherConfig,
    query: &str,
    result: Result<Vec<String>, ApiError>,
    rng: impl FnMut() -> f64,
) -> SuggestionOutcome {
    match (result, config.fallback_prefix) {
        (Ok(list), _) if !list.is_empty() => SuggestionOutcome::Remote(list),
        (Ok(_), Some(prefix)) => SuggestionOutcome::Fallback {
            candidates: synthetic_candidates(prefix, query, rng),
            reason: FallbackReason::EmptyRemote,
        },
        (Ok(list), None) => SuggestionOutcome::Remote(list),
        (Err(error), Some(prefix)) => {
            log::warn!("⚠️ [AUTOCOMPLETE] Backend no disponible ({}), usando candidatos sintéticos", error);
            SuggestionOutcome::Fallback {
                candidates: synthetic_candidates(prefix, query, rng),
                reason: FallbackReason::Unreachable(error),
            }
        }
        (Err(error), None) => {
            log::warn!("⚠️ [AUTOCOMPLETE] Backend no disponible: {}", error);
            SuggestionOutcome::Unavailable(error)
        }
    }
}

/// Candidatos `{prefix}{1000..=9999}` filtrados por substring sin mayúsculas.
/// Si ninguno contiene la query se generan de nuevo incrustándola, así la
/// lista nunca queda vacía.
pub fn synthetic_candidates(prefix: &str, query: &str, mut rng: impl FnMut() -> f64) -> Vec<String> {
    let query = query.trim();
    let needle = query.to_lowercase();

    let generated: Vec<String> = (0..FALLBACK_CANDIDATE_COUNT)
        .map(|_| format!("{}{}", prefix, random_digits(&mut rng)))
        .collect();
    let matching: Vec<String> = generated
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .collect();
    if !matching.is_empty() {
        return dedupe(matching);
    }

    let rest = strip_prefix_ignore_case(query, prefix);
    let embedded = (0..FALLBACK_CANDIDATE_COUNT)
        .map(|_| format!("{}{}{}", prefix, rest, random_digits(&mut rng)))
        .collect();
    dedupe(embedded)
}

fn random_digits(rng: &mut impl FnMut() -> f64) -> u32 {
    let offset = (rng().clamp(0.0, 1.0) * 9000.0).floor() as u32;
    (1000 + offset).min(9999)
}

fn strip_prefix_ignore_case<'a>(query: &'a str, prefix: &str) -> &'a str {
    match (query.get(..prefix.len()), query.get(prefix.len()..)) {
        (Some(head), Some(rest)) if head.eq_ignore_ascii_case(prefix) => rest,
        _ => query,
    }
}

fn dedupe(candidates: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(prefix: Option<&'static str>) -> FetcherConfig {
        FetcherConfig {
            min_chars: 2,
            debounce_ms: 300,
            fallback_prefix: prefix,
        }
    }

    /// RNG determinista que recorre [0, 1)
    fn stepping_rng() -> impl FnMut() -> f64 {
        let mut n = 0u32;
        move || {
            n += 1;
            (n as f64 * 0.0917) % 1.0
        }
    }

    #[test]
    fn short_queries_never_schedule_a_request() {
        let mut fetcher = SuggestionFetcher::new(config(Some("MAWB")));
        for query in ["", "1", " 1 ", "é"] {
            assert_eq!(fetcher.edit(query), DebounceAction::Cancel);
            assert_eq!(fetcher.phase(), FetchPhase::Idle);
        }
        // Un timer viejo no puede emitir tras una edición corta
        assert_eq!(fetcher.fire(0), None);
        assert_eq!(fetcher.fire(1), None);
    }

    #[test]
    fn rapid_edits_fire_exactly_once_with_final_query() {
        let mut fetcher = SuggestionFetcher::new(config(Some("MAWB")));
        let generations: Vec<u64> = ["17", "176", "176-1"]
            .iter()
            .map(|q| match fetcher.edit(q) {
                DebounceAction::Schedule { generation, delay_ms } => {
                    assert_eq!(delay_ms, 300);
                    generation
                }
                DebounceAction::Cancel => panic!("query largo cancelado"),
            })
            .collect();
        assert_eq!(fetcher.phase(), FetchPhase::Debouncing);

        let tickets: Vec<SuggestionTicket> = generations
            .iter()
            .filter_map(|g| fetcher.fire(*g))
            .collect();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].query, "176-1");
        assert_eq!(fetcher.phase(), FetchPhase::Loading);

        // Ya emitido: el mismo timer no vuelve a disparar
        assert_eq!(fetcher.fire(*generations.last().unwrap()), None);
    }

    #[test]
    fn stale_outcome_never_overwrites_newer_one() {
        let mut fetcher = SuggestionFetcher::new(config(Some("MAWB")));
        let DebounceAction::Schedule { generation, .. } = fetcher.edit("176") else {
            panic!("esperaba Schedule");
        };
        let old = fetcher.fire(generation).unwrap();

        let DebounceAction::Schedule { generation, .. } = fetcher.edit("176-12") else {
            panic!("esperaba Schedule");
        };
        let new = fetcher.fire(generation).unwrap();
        assert!(new.seq > old.seq);

        assert!(fetcher.settle(&new, SuggestionOutcome::Remote(vec!["176-12345678".into()])));
        assert!(!fetcher.settle(&old, SuggestionOutcome::Remote(vec!["176-00000000".into()])));
        assert_eq!(fetcher.suggestions(), ["176-12345678".to_string()]);
        assert_eq!(fetcher.phase(), FetchPhase::Settled);
    }

    #[test]
    fn edit_during_loading_drops_the_in_flight_result() {
        let mut fetcher = SuggestionFetcher::new(config(Some("MAWB")));
        let DebounceAction::Schedule { generation, .. } = fetcher.edit("176") else {
            panic!("esperaba Schedule");
        };
        let ticket = fetcher.fire(generation).unwrap();
        fetcher.edit("1");
        assert!(!fetcher.settle(&ticket, SuggestionOutcome::Remote(vec!["176-1".into()])));
        assert!(fetcher.suggestions().is_empty());
        assert_eq!(fetcher.phase(), FetchPhase::Idle);
    }

    #[test]
    fn select_closes_the_list() {
        let mut fetcher = SuggestionFetcher::new(config(Some("MAWB")));
        let DebounceAction::Schedule { generation, .. } = fetcher.edit("176") else {
            panic!("esperaba Schedule");
        };
        let ticket = fetcher.fire(generation).unwrap();
        fetcher.settle(&ticket, SuggestionOutcome::Remote(vec!["176-12345678".into()]));

        fetcher.select("176-12345678");
        assert_eq!(fetcher.query(), "176-12345678");
        assert!(fetcher.suggestions().is_empty());
        assert_eq!(fetcher.fire(generation), None);
    }

    #[test]
    fn backend_down_with_ma_query_yields_mawb_candidates() {
        let outcome = resolve_outcome(
            &config(Some("MAWB")),
            "MA",
            Err(ApiError::Network("Failed to fetch".into())),
            stepping_rng(),
        );
        assert!(outcome.is_offline());
        let candidates = outcome.candidates();
        assert!(!candidates.is_empty());
        for candidate in candidates {
            assert!(candidate.starts_with("MAWB"));
            assert!(candidate.to_lowercase().contains("ma"));
        }
    }

    #[test]
    fn fallback_is_never_empty_and_always_matches() {
        for query in ["ma", "mawb12", "xyz", "WB9", "  42 ", "ñandú"] {
            let candidates = synthetic_candidates("MAWB", query, stepping_rng());
            assert!(!candidates.is_empty(), "vacío para {:?}", query);
            let needle = query.trim().to_lowercase();
            for candidate in &candidates {
                assert!(candidate.starts_with("MAWB"));
                assert!(candidate.to_lowercase().contains(&needle), "{} no contiene {}", candidate, needle);
            }
        }
    }

    #[test]
    fn fallback_candidates_are_unique() {
        // RNG constante: todos los números coinciden
        let candidates = synthetic_candidates("MAWB", "mawb", || 0.5);
        assert_eq!(candidates, vec!["MAWB5500".to_string()]);
    }

    #[test]
    fn empty_remote_list_falls_back_but_is_not_offline() {
        let outcome = resolve_outcome(&config(Some("MAWB")), "MA", Ok(vec![]), stepping_rng());
        match &outcome {
            SuggestionOutcome::Fallback { reason, candidates } => {
                assert_eq!(*reason, FallbackReason::EmptyRemote);
                assert!(!candidates.is_empty());
            }
            other => panic!("esperaba fallback, llegó {:?}", other),
        }
        assert!(!outcome.is_offline());
    }

    #[test]
    fn flights_have_no_synthetic_fallback() {
        let flights = config(None);
        let failed = resolve_outcome(&flights, "EK", Err(ApiError::Timeout(15)), stepping_rng());
        assert_eq!(failed, SuggestionOutcome::Unavailable(ApiError::Timeout(15)));
        assert!(failed.candidates().is_empty());

        let empty = resolve_outcome(&flights, "EK", Ok(vec![]), stepping_rng());
        assert_eq!(empty, SuggestionOutcome::Remote(vec![]));

        let remote = resolve_outcome(&flights, "EK", Ok(vec!["EK202".into()]), stepping_rng());
        assert_eq!(remote.candidates(), ["EK202".to_string()]);
    }
}
