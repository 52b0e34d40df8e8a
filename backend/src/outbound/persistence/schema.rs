//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    items (id) {
        id -> Uuid,
        title -> Text,
        description -> Nullable<Text>,
        category -> Nullable<Text>,
        image_url -> Nullable<Text>,
        status -> Text,
        claimed_by_note -> Nullable<Text>,
        date_posted -> Timestamptz,
    }
}
