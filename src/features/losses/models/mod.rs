mod loss;

pub use loss::{Loss, LossState, NewLoss};
