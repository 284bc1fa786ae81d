//! Repository structs, one per table. Each exposes associated async
//! functions taking a `&PgPool`.

pub mod business_enquiry_repo;
pub mod contact_repo;
pub mod inquiry_repo;
pub mod product_repo;
pub mod sale_repo;
pub mod user_repo;

pub use business_enquiry_repo::BusinessEnquiryRepo;
pub use contact_repo::ContactRepo;
pub use inquiry_repo::InquiryRepo;
pub use product_repo::ProductRepo;
pub use sale_repo::SaleRepo;
pub use user_repo::UserRepo;
