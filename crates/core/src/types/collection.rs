//! Collection names and the field names the router addresses directly.

/// Database holding both collections unless configured otherwise.
pub const DEFAULT_DATABASE: &str = "coffeeDB";

/// Collection of coffee items.
pub const COFFEE_COLLECTION: &str = "coffee";

/// Collection of user records.
pub const USERS_COLLECTION: &str = "users";

/// Primary key field assigned by the store.
pub const ID_FIELD: &str = "_id";

/// The only coffee fields a replace (`PUT /coffee/{id}`) copies from the body.
///
/// Anything else in the body is ignored.
pub const COFFEE_FIELDS: [&str; 7] = [
    "name", "supplier", "category", "chef", "taste", "details", "photo",
];

/// Field used to select the user record on `PATCH /users`.
pub const USER_EMAIL_FIELD: &str = "email";

/// The single user field `PATCH /users` sets.
pub const USER_LAST_SIGN_IN_FIELD: &str = "lastSignIn";
