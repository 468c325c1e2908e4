mod loss_handler;

pub use loss_handler::*;
