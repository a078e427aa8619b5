pub mod admin;
pub mod announcements;
pub mod certificates;
pub mod content;
pub mod exams;
pub mod ids;
pub mod messages;
pub mod resource_persons;
pub mod settings;
pub mod sponsors;
pub mod staff;
pub mod trainees;
