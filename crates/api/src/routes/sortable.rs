//! Ordering, publish and trash routes bound to one [`ContentTable`].

use axum::extract::{Path, State};
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use vitrine_core::types::DbId;
use vitrine_db::ContentTable;

use crate::handlers::sortable::{self, MoveRequest, ReorderRequest};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Routes merged into every content resource router.
///
/// ```text
/// PUT    /reorder         -> reorder
/// DELETE /{id}            -> soft_delete
/// POST   /{id}/restore    -> restore
/// POST   /{id}/toggle     -> toggle
/// POST   /{id}/move       -> move_to
/// ```
pub fn router(table: ContentTable) -> Router<AppState> {
    Router::new()
        .route(
            "/reorder",
            put(
                move |state: State<AppState>,
                      editor: RequireEditor,
                      body: Json<ReorderRequest>| {
                    sortable::reorder(table, state, editor, body)
                },
            ),
        )
        .route(
            "/{id}",
            delete(
                move |state: State<AppState>, editor: RequireEditor, id: Path<DbId>| {
                    sortable::soft_delete(table, state, editor, id)
                },
            ),
        )
        .route(
            "/{id}/restore",
            post(
                move |state: State<AppState>, editor: RequireEditor, id: Path<DbId>| {
                    sortable::restore(table, state, editor, id)
                },
            ),
        )
        .route(
            "/{id}/toggle",
            post(
                move |state: State<AppState>, editor: RequireEditor, id: Path<DbId>| {
                    sortable::toggle(table, state, editor, id)
                },
            ),
        )
        .route(
            "/{id}/move",
            post(
                move |state: State<AppState>,
                      editor: RequireEditor,
                      id: Path<DbId>,
                      body: Json<MoveRequest>| {
                    sortable::move_to(table, state, editor, id, body)
                },
            ),
        )
}
