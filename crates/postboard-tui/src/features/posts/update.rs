//! Post list reducer.

use postboard_types::Post;

use crate::common::{Query, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 3;

/// Issues a list fetch, cancelling any fetch still in flight.
pub fn request_fetch(
    posts: &mut Query<Vec<Post>>,
    tasks: &mut Tasks,
    task_seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    let running = tasks.state_mut(TaskKind::PostList);
    if running.is_running() {
        effects.push(UiEffect::CancelTask {
            kind: TaskKind::PostList,
            token: running.cancel.clone(),
        });
        // A late completion of the cancelled fetch must not land.
        running.clear();
    }
    posts.start_fetch();
    effects.push(UiEffect::FetchPosts {
        task: task_seq.next_id(),
    });
    effects
}

/// Staleness signal received: mark stale and re-issue the fetch.
pub fn handle_invalidated(
    posts: &mut Query<Vec<Post>>,
    tasks: &mut Tasks,
    task_seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    posts.invalidate();
    request_fetch(posts, tasks, task_seq)
}

pub fn handle_posts_loaded(
    posts: &mut Query<Vec<Post>>,
    first_row: &mut usize,
    result: Result<Vec<Post>, String>,
) {
    if let Err(error) = &result {
        tracing::warn!(%error, "post list query failed");
    }
    posts.settle(result);
    *first_row = (*first_row).min(max_first_row(posts));
}

/// Scrolls the grid by `delta` rows, clamped to the available rows.
pub fn scroll(posts: &Query<Vec<Post>>, first_row: &mut usize, delta: isize) {
    let next = first_row.saturating_add_signed(delta);
    *first_row = next.min(max_first_row(posts));
}

fn max_first_row(posts: &Query<Vec<Post>>) -> usize {
    let count = posts.data().map_or(0, Vec::len);
    count.div_ceil(GRID_COLUMNS).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use postboard_types::Author;

    use super::*;
    use crate::common::{TaskId, TaskStarted};

    fn posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| Post {
                id: i.to_string(),
                title: String::new(),
                body: String::new(),
                created_at: Utc::now(),
                author: Author {
                    name: String::new(),
                    image: None,
                },
            })
            .collect()
    }

    #[test]
    fn test_request_fetch_marks_fetching() {
        let mut query = Query::new();
        let mut seq = TaskSeq::default();
        let effects = request_fetch(&mut query, &mut Tasks::default(), &mut seq);

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchPosts { task: TaskId(0) }]
        ));
        assert!(query.is_fetching());
        assert!(!query.is_stale());
    }

    #[test]
    fn test_invalidation_cancels_in_flight_fetch() {
        let mut query = Query::new();
        query.resolve(posts(1));
        let mut tasks = Tasks::default();
        tasks.state_mut(TaskKind::PostList).on_started(&TaskStarted {
            id: TaskId(7),
            cancel: None,
        });
        let mut seq = TaskSeq::default();

        let effects = handle_invalidated(&mut query, &mut tasks, &mut seq);
        assert!(matches!(
            effects.as_slice(),
            [
                UiEffect::CancelTask {
                    kind: TaskKind::PostList,
                    ..
                },
                UiEffect::FetchPosts { .. }
            ]
        ));
        // The superseded fetch is forgotten so its completion is dropped.
        assert!(!tasks.state_mut(TaskKind::PostList).finish_if_active(TaskId(7)));
        // Cached data stays visible while re-fetching.
        assert_eq!(query.data().map(Vec::len), Some(1));
    }

    #[test]
    fn test_scroll_is_clamped_to_rows() {
        let mut query = Query::new();
        query.resolve(posts(7)); // 3 rows
        let mut first_row = 0;

        scroll(&query, &mut first_row, 10);
        assert_eq!(first_row, 2);
        scroll(&query, &mut first_row, -1);
        assert_eq!(first_row, 1);
        scroll(&query, &mut first_row, -5);
        assert_eq!(first_row, 0);
    }

    #[test]
    fn test_shrinking_list_reclamps_scroll() {
        let mut query = Query::new();
        let mut first_row = 4;
        handle_posts_loaded(&mut query, &mut first_row, Ok(posts(2)));
        assert_eq!(first_row, 0);
    }
}
