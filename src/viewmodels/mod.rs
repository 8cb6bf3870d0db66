pub mod suggestion_fetcher;
pub mod autocomplete_viewmodel;
pub mod checker_viewmodel;
pub mod trolley_viewmodel;

pub use suggestion_fetcher::{
    FallbackReason, FetchPhase, FetcherConfig, SuggestionFetcher, SuggestionOutcome,
};
pub use autocomplete_viewmodel::{AutocompleteViewModel, SuggestionField};
pub use checker_viewmodel::CheckerViewModel;
pub use trolley_viewmodel::{TrolleyLogin, TrolleyViewModel};
