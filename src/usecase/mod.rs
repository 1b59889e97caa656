pub mod register_account_usecase;
