//! Sample data
//!
//! Generates chess-themed posts for demos and local testing.

use chrono::{Duration, NaiveDate};

use crate::model::Post;

const AUTHORS: [&str; 5] = [
    "Magnus Carlsen",
    "Garry Kasparov",
    "Bobby Fischer",
    "Anatoly Karpov",
    "Vishy Anand",
];

const TOPICS: [&str; 21] = [
    "Opening Strategies",
    "Endgame Techniques",
    "Tactical Masterpieces",
    "Chess Psychology",
    "Famous Games",
    "Chess History",
    "Pawn Structures",
    "Rook Endgames",
    "Knight Maneuvers",
    "Bishop Pair Advantage",
    "Queen Sacrifices",
    "Checkmate Patterns",
    "Blindfold Chess",
    "Time Management",
    "Chess Engines",
    "Online Chess Platforms",
    "Chess Books Review",
    "Women in Chess",
    "Chess for Beginners",
    "Advanced Tactics",
    "Chess Openings Explained",
];

/// Default number of generated posts
pub const DEFAULT_COUNT: usize = 50;

/// `count` posts with ids `1..=count`, post `i` dated `i` days before `today`
pub fn chess_posts(count: usize, today: NaiveDate) -> Vec<Post> {
    (1..=count)
        .map(|i| {
            let title = format!("Post #{}: {}", i, TOPICS[i % TOPICS.len()]);
            let author = AUTHORS[i % AUTHORS.len()];
            let date = today
                .checked_sub_signed(Duration::days(i as i64))
                .unwrap_or(NaiveDate::MIN);
            let content = format!(
                "This post explores the fascinating world of {}. \
                 {} shares insights on how to improve your skills in this area. \
                 Whether you're a beginner or an advanced player, these tips will help you \
                 elevate your game. Stay tuned for more chess wisdom!",
                title.to_lowercase(),
                author
            );

            Post {
                id: i as u64,
                title,
                content,
                author: author.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
            }
        })
        .collect()
}
