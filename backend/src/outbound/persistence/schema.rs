//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Topics put up for a vote. `title` carries a unique index.
    topics (id) {
        id -> Uuid,
        #[max_length = 50]
        title -> Varchar,
        #[max_length = 500]
        description -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Voting windows opened on a topic.
    voting_sessions (id) {
        id -> Uuid,
        topic_id -> Uuid,
        start_time -> Timestamptz,
        end_time -> Timestamptz,
    }
}

diesel::table! {
    /// Cast votes. `(topic_id, cpf)` carries a unique index.
    votes (id) {
        id -> Uuid,
        voting_session_id -> Uuid,
        topic_id -> Uuid,
        #[max_length = 11]
        cpf -> Varchar,
        /// `true` for a favourable vote.
        choice -> Bool,
        voted_at -> Timestamptz,
    }
}

diesel::joinable!(voting_sessions -> topics (topic_id));
diesel::joinable!(votes -> voting_sessions (voting_session_id));

diesel::allow_tables_to_appear_in_same_query!(topics, voting_sessions, votes);
