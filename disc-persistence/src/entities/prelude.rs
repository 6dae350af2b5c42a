pub use super::collections::Entity as Collections;
