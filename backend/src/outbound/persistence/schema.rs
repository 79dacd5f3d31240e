//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Hotel rooms. `room_number` is unique.
    rooms (id) {
        id -> Integer,
        room_number -> Text,
        room_type -> Text,
        /// One of `available`, `occupied`, `cleaning`, `maintenance`.
        status -> Text,
        /// Nightly rate.
        price -> Double,
    }
}

diesel::table! {
    /// Guest stays. Rows are never deleted; checkout flips `status`.
    guests (id) {
        id -> Integer,
        name -> Text,
        phone -> Nullable<Text>,
        email -> Nullable<Text>,
        check_in -> Date,
        check_out -> Date,
        room_id -> Integer,
        /// `active` or `checked_out`. At most one active guest per room.
        status -> Text,
    }
}

diesel::table! {
    /// Housekeeping and maintenance tasks.
    tasks (id) {
        id -> Integer,
        room_id -> Integer,
        task_type -> Text,
        description -> Text,
        /// One of `pending`, `in_progress`, `completed`.
        status -> Text,
        assigned_to -> Nullable<Text>,
        /// UTC.
        created_at -> Timestamp,
        /// UTC; set when the task completes.
        completed_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    /// Append-only inspection log.
    quality_checks (id) {
        id -> Integer,
        room_id -> Integer,
        cleanliness_score -> Integer,
        amenities_score -> Integer,
        maintenance_score -> Integer,
        notes -> Text,
        checked_by -> Text,
        /// UTC.
        check_date -> Timestamp,
    }
}

diesel::joinable!(guests -> rooms (room_id));
diesel::joinable!(tasks -> rooms (room_id));
diesel::joinable!(quality_checks -> rooms (room_id));

diesel::allow_tables_to_appear_in_same_query!(rooms, guests, tasks, quality_checks);
