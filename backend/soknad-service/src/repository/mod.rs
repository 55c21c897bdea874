mod postgres_repository;
mod r#trait;

#[cfg(test)]
pub use r#trait::MockSoknadStore;
pub use postgres_repository::PostgresSoknadRepository;
pub use r#trait::SoknadStore;
