// ============================================================================
// ACTIVITY - Registros de actividad reciente (lista acotada, más nuevo primero)
// ============================================================================

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use crate::config::CONFIG;
use crate::models::session::{CheckerIdentity, TrolleyIdentity};

/// Actualización de piezas recibidas (dashboard del checker)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PiecesSubmission {
    pub mawb: String,
    pub pcs_received: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PiecesSubmission {
    pub fn new(
        mawb: &str,
        pcs_received: u32,
        identity: Option<&CheckerIdentity>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            mawb: mawb.to_string(),
            pcs_received,
            checker_id: identity.map(|i| i.checker_id.clone()),
            team_name: identity.map(|i| i.team_name.clone()),
            timestamp,
        }
    }

    /// "C-104 (Ramp A)" o solo "C-104" si no hay equipo
    pub fn actor_label(&self) -> Option<String> {
        let checker_id = self.checker_id.as_ref()?;
        match self.team_name.as_deref() {
            Some(team) if !team.is_empty() => Some(format!("{} ({})", checker_id, team)),
            _ => Some(checker_id.clone()),
        }
    }
}

/// Asignación de número de BT (dashboard de trolley)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BtSubmission {
    pub flight_number: String,
    pub mawb: String,
    pub bt_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl BtSubmission {
    pub fn new(
        flight_number: &str,
        mawb: &str,
        bt_number: &str,
        identity: Option<&TrolleyIdentity>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            flight_number: flight_number.to_string(),
            mawb: mawb.to_string(),
            bt_number: bt_number.to_string(),
            employee_id: identity.map(|i| i.employee_id.clone()),
            timestamp,
        }
    }
}

/// Lista de recientes acotada. Se serializa como un array JSON plano,
/// el mismo formato que ya existe en localStorage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentList<T> {
    entries: Vec<T>,
}

impl<T> Default for RecentList<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> RecentList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity() -> usize {
        CONFIG.ui_config.recent_activity_limit.max(1)
    }

    /// Construir desde datos persistidos (se recorta si hay de más)
    pub fn from_vec(mut entries: Vec<T>) -> Self {
        entries.truncate(Self::capacity());
        Self { entries }
    }

    /// Insertar al principio; el más antiguo sale si se supera la capacidad
    pub fn push(&mut self, entry: T) {
        self.entries.insert(0, entry);
        self.entries.truncate(Self::capacity());
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Contadores del dashboard del checker: hoy / total
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityStats {
    pub updated_today: usize,
    pub total_updated: usize,
}

impl ActivityStats {
    /// "Hoy" se evalúa en la zona horaria de `now`
    pub fn from_submissions<Tz: TimeZone>(submissions: &[PiecesSubmission], now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let timezone = now.timezone();
        let updated_today = submissions
            .iter()
            .filter(|s| s.timestamp.with_timezone(&timezone).date_naive() == today)
            .count();

        Self {
            updated_today,
            total_updated: submissions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn push_keeps_newest_first_and_evicts_oldest() {
        let mut list = RecentList::new();
        for n in 1..=7u32 {
            list.push(n);
        }
        assert_eq!(list.len(), 5);
        assert_eq!(list.as_slice(), &[7, 6, 5, 4, 3]);
    }

    #[test]
    fn push_adds_exactly_one_entry_below_capacity() {
        let mut list = RecentList::from_vec(vec![2, 1]);
        list.push(3);
        assert_eq!(list.as_slice(), &[3, 2, 1]);
    }

    #[test]
    fn from_vec_truncates_oversized_history() {
        let list = RecentList::from_vec((0..9).collect::<Vec<u32>>());
        assert_eq!(list.len(), 5);
        assert_eq!(list.latest(), Some(&0));
    }

    #[test]
    fn new_submission_becomes_head() {
        let now = at("2026-10-18T09:30:00Z");
        let identity = CheckerIdentity::new("C-104", "Ramp A");
        let mut list = RecentList::new();
        list.push(PiecesSubmission::new("020-11111111", 3, Some(&identity), now - Duration::hours(1)));
        list.push(PiecesSubmission::new("176-12345678", 50, Some(&identity), now));

        let head = list.latest().unwrap();
        assert_eq!(head.mawb, "176-12345678");
        assert_eq!(head.pcs_received, 50);
        assert_eq!(head.timestamp, now);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn serializes_as_plain_array_compatible_with_js_records() {
        let raw = r#"[{"mawb":"176-12345678","pcs_received":50,"checker_id":"C-1","team_name":"A","timestamp":"2026-10-18T09:30:00.000Z"}]"#;
        let list: RecentList<PiecesSubmission> = serde_json::from_str(raw).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.latest().unwrap().actor_label().as_deref(), Some("C-1 (A)"));

        let back = serde_json::to_value(&list).unwrap();
        assert!(back.is_array());
        assert_eq!(back[0]["pcs_received"], 50);
    }

    #[test]
    fn submission_without_identity_omits_actor_fields() {
        let submission = PiecesSubmission::new("176-1", 1, None, at("2026-10-18T09:30:00Z"));
        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("checker_id").is_none());
        assert_eq!(submission.actor_label(), None);
    }

    #[test]
    fn stats_count_only_todays_records() {
        let now = at("2026-10-18T18:00:00Z");
        let records = vec![
            PiecesSubmission::new("A", 1, None, at("2026-10-18T08:00:00Z")),
            PiecesSubmission::new("B", 1, None, at("2026-10-18T00:00:00Z")),
            PiecesSubmission::new("C", 1, None, at("2026-10-17T23:59:59Z")),
        ];
        let stats = ActivityStats::from_submissions(&records, &now);
        assert_eq!(stats, ActivityStats { updated_today: 2, total_updated: 3 });
    }

    #[test]
    fn bt_submission_keeps_flight_and_employee() {
        let identity = TrolleyIdentity::new("E-77");
        let submission = BtSubmission::new("AI-101", "098-7654321", "BT-12", Some(&identity), at("2026-10-18T09:30:00Z"));
        assert_eq!(submission.employee_id.as_deref(), Some("E-77"));
        assert_eq!(submission.flight_number, "AI-101");
    }
}
