pub mod hashmap_user_store;
pub mod memory_revocation_store;
pub mod memory_verification_code_store;
pub mod postgres_user_store;
pub mod redis_handle;
pub mod redis_revocation_store;
pub mod redis_verification_code_store;

pub use hashmap_user_store::HashMapUserStore;
pub use memory_revocation_store::MemoryRevocationStore;
pub use memory_verification_code_store::MemoryVerificationCodeStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_handle::RedisHandle;
pub use redis_revocation_store::RedisRevocationStore;
pub use redis_verification_code_store::RedisVerificationCodeStore;
