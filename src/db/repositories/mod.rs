mod admin_repository;
mod announcement_repository;
mod certificate_repository;
mod content_repository;
mod exam_repository;
mod id_repository;
mod message_repository;
mod resource_person_repository;
mod setting_repository;
mod sponsor_repository;
mod staff_repository;
mod trainee_repository;

pub use admin_repository::AdminRepository;
pub use announcement_repository::AnnouncementRepository;
pub use certificate_repository::CertificateRepository;
pub use content_repository::ContentRepository;
pub use exam_repository::ExamRepository;
pub use id_repository::IdRepository;
pub use message_repository::MessageRepository;
pub use resource_person_repository::ResourcePersonRepository;
pub use setting_repository::SettingRepository;
pub use sponsor_repository::SponsorRepository;
pub use staff_repository::StaffRepository;
pub use trainee_repository::TraineeRepository;
