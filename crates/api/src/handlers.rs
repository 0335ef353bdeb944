pub mod reference;
pub mod session;
pub mod weeks;
