mod mock_contacts_service;
mod mock_files_service;

#[allow(unused_imports)]
pub use mock_contacts_service::MockContactsService;
#[allow(unused_imports)]
pub use mock_files_service::MockFilesService;
