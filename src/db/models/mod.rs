mod admin;
mod announcement;
mod certificate;
mod content;
mod exam;
mod generated_id;
mod message;
mod resource_person;
mod setting;
mod sponsor;
mod staff;
mod trainee;

pub use admin::*;
pub use announcement::*;
pub use certificate::*;
pub use content::*;
pub use exam::*;
pub use generated_id::*;
pub use message::*;
pub use resource_person::*;
pub use setting::*;
pub use sponsor::*;
pub use staff::*;
pub use trainee::*;
