pub mod polling_service;
pub mod recognition_service;
pub mod scan_service;
