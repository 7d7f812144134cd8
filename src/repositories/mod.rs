pub mod product_repository;
pub mod subscription_repository;

// Re-export all repositories for convenient access
pub use product_repository::ProductRepository;
pub use subscription_repository::SubscriptionRepository;
