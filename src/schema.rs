table! {
    posts (id) {
        id -> Integer,
        message_id -> Integer,
        content -> Text,
        media_type -> Nullable<Text>,
        category -> Nullable<Text>,
        timestamp -> Nullable<Text>,
    }
}
