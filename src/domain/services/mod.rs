pub mod social_linkage_service;
