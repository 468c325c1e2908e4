mod loss_dto;

pub use loss_dto::{LossFullResponseDto, LossResponseDto, PetSummaryDto, UpsertLossDto};
