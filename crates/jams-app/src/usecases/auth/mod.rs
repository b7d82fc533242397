pub mod current_session;
pub mod login;
pub mod sign_out;

pub use current_session::CurrentSession;
pub use login::{LoginError, LoginWithPassword};
pub use sign_out::SignOut;
