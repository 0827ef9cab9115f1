pub mod pass_create;
