pub mod cancel_ops;
pub mod dispatch_ops;
pub mod intercept_ops;

pub use cancel_ops::{cancel_session, handle_cancel_request};
pub use dispatch_ops::{dispatch_into, dispatch_start};
pub use intercept_ops::{intercept_order, Decision, InterceptOutcome};
