pub mod in_memory_account_repository;
pub mod social_token_linkage_resolver;
