pub mod account;
pub mod application;
pub mod application_log;
pub mod category;
pub mod projector_control;
pub mod screensaver_control;

pub mod prelude {
    pub use super::account::{
        ActiveModel as AccountActiveModel, Column as AccountColumn, Entity as Account,
        Model as AccountModel,
    };
    pub use super::application::{
        ActiveModel as ApplicationActiveModel, Column as ApplicationColumn, Entity as Application,
        Model as ApplicationModel,
    };
    pub use super::application_log::{
        ActiveModel as ApplicationLogActiveModel, Column as ApplicationLogColumn,
        Entity as ApplicationLog, Model as ApplicationLogModel,
    };
    pub use super::category::{
        ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as Category,
        Model as CategoryModel,
    };
    pub use super::projector_control::{
        ActiveModel as ProjectorControlActiveModel, Column as ProjectorControlColumn,
        Entity as ProjectorControl, Model as ProjectorControlModel,
    };
    pub use super::screensaver_control::{
        ActiveModel as ScreensaverControlActiveModel, Column as ScreensaverControlColumn,
        Entity as ScreensaverControl, Model as ScreensaverControlModel,
    };
}
