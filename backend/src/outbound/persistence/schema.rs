//! Diesel table definitions.
//!
//! Must match `backend/migrations`. Regenerate with `diesel print-schema`
//! against a migrated database when the migrations change.

diesel::table! {
    /// Users. `email` carries the `users_email_key` unique constraint.
    users (id) {
        id -> Text,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        password -> Text,
        organization_id -> Text,
        profile_picture -> Text,
        role -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    organizations (id) {
        id -> Text,
        name -> Text,
        logo -> Text,
        owner_user_id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    positions (id) {
        id -> Text,
        organization_id -> Text,
        title -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Nominations. `status` is constrained to the three lifecycle values.
    nominations (id) {
        id -> Text,
        position_id -> Text,
        nominee_id -> Text,
        nominator_id -> Text,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, organizations, positions, nominations);
