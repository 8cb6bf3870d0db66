// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod route;
pub mod auth_state;
pub mod toast_state;
pub mod app_state;

pub use reactivity::*;
pub use route::*;
pub use auth_state::*;
pub use toast_state::*;
pub use app_state::*;
