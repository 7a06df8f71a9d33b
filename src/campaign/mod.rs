//! Company email campaigns.
//!
//! A campaign resolves the selected companies, renders one personalized
//! message per recipient and sends them one after the other through the
//! injected `MailSender`. Individual failures are collected into the
//! `CampaignResult` instead of aborting the batch.

mod dispatcher;
mod service;
mod types;

pub use dispatcher::{personalize, BulkDispatcher, CONTACT_FALLBACK};
pub use service::CampaignService;
pub use types::{CampaignError, CampaignRequest, CampaignResult, CustomEmail};
