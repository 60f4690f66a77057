//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod about_repo;
pub mod audit_repo;
pub mod contact_repo;
pub mod faq_repo;
pub mod gallery_repo;
pub mod newsletter_repo;
pub mod package_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod review_repo;
pub mod role_repo;
pub mod seo_repo;
pub mod service_repo;
pub mod session_repo;
pub mod setting_repo;
pub mod sortable_repo;
pub mod stat_repo;
pub mod trash_repo;
pub mod user_repo;

pub use about_repo::AboutContentRepo;
pub use audit_repo::AuditLogRepo;
pub use contact_repo::ContactSubmissionRepo;
pub use faq_repo::FaqRepo;
pub use gallery_repo::GalleryItemRepo;
pub use newsletter_repo::NewsletterRepo;
pub use package_repo::PackageRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use review_repo::ReviewRepo;
pub use role_repo::RoleRepo;
pub use seo_repo::SeoRepo;
pub use service_repo::ServiceRepo;
pub use session_repo::SessionRepo;
pub use setting_repo::SettingRepo;
pub use sortable_repo::SortableRepo;
pub use stat_repo::StatRepo;
pub use trash_repo::TrashRepo;
pub use user_repo::UserRepo;
