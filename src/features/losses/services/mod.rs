mod loss_service;

pub use loss_service::LossService;
