table! {
    games (id) {
        id -> Int4,
        user_id -> Int4,
        rounds -> Int4,
        score -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    questions (id) {
        id -> Int4,
        question -> Text,
        description -> Nullable<Text>,
        explanation -> Nullable<Text>,
        tip -> Nullable<Text>,
        category -> Varchar,
        difficulty -> Varchar,
        answers -> Array<Text>,
        correct_answers -> Array<Bool>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    rounds (id) {
        id -> Int4,
        game_id -> Int4,
        question_id -> Int4,
        position -> Int4,
        selected_answer -> Nullable<Int4>,
        is_correct -> Nullable<Bool>,
        answered_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

joinable!(games -> users (user_id));
joinable!(rounds -> games (game_id));
joinable!(rounds -> questions (question_id));

allow_tables_to_appear_in_same_query!(games, questions, rounds, users);
