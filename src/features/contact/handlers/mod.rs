pub mod contact_handler;

pub use contact_handler::{
    __path_close_lead, __path_create_contact_message, __path_export_leads, __path_list_leads,
    close_lead, create_contact_message, export_leads, list_leads,
};
