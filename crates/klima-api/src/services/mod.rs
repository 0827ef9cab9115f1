pub mod pass_service;
