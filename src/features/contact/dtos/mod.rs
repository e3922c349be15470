mod contact_dto;

pub use contact_dto::{
    CloseLeadDto, CloseLeadResponseDto, CreateContactMessageDto, LeadResponseDto,
};
