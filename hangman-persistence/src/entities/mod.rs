pub mod players;

pub mod prelude {
    pub use super::players::Entity as Players;
}
