pub mod session;
pub mod activity;
pub mod api;
pub mod forms;

pub use session::{CheckerIdentity, TrolleyIdentity};
pub use activity::{ActivityStats, BtSubmission, PiecesSubmission, RecentList};
pub use forms::FieldErrors;
