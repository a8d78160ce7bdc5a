diesel::table! {
    measurements (id) {
        id -> Int4,
        #[max_length = 25]
        recorded_at -> Varchar,
        value -> Float8,
    }
}

diesel::table! {
    locations (id) {
        id -> Int4,
        city -> Nullable<Text>,
        country -> Nullable<Text>,
        latitude -> Nullable<Float8>,
        longitude -> Nullable<Float8>,
        measurement_count -> Nullable<Int4>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(measurements, locations,);
