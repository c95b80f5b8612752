pub use crate::domain::{
    account::{AccountInfo, NewAccount},
    application::{
        ApplicationInfo, ApplicationLogInfo, ApplicationPageParams, NewApplication,
        NewApplicationLog, UpdateApplication, VoteRequest,
    },
    auth::{Actor, Claims, LoginRequest, LoginResponse, Principal},
    category::{CategoryInfo, NewCategory, RenameCategory},
    common::PageResult,
    control::{ProjectorSchedule, ScreensaverSchedule},
    moderation::{AbuseReport, AddAdmin, AdminMessage},
};
