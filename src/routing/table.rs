//! The HitWalker2 route table.
//!
//! Order matters: the router takes the first match, so entries are listed
//! exactly as the application declares them.

use serde_json::json;

use crate::config::AppConfig;
use crate::routing::error::BuildError;
use crate::routing::route::Route;

/// Handler id for the framework login view.
pub const LOGIN_HANDLER: &str = "auth.login";

/// Handler id for the framework logout-then-login view.
pub const LOGOUT_HANDLER: &str = "auth.logout_then_login";

/// Aliases of the index view: (pattern, retry_message, name).
const INDEX_ALIASES: &[(&str, &str, &str)] = &[
    (r"^$", "", "index"),
    (r"^NoSample$", "No Sample Specified", "indexNoSample"),
    (r"^SampleNotFound$", "Sample Not Found", "indexSampleNotFound"),
    (r"^Ambigous$", "Ambigous Alias", "indexAmbigous"),
];

/// Plain views: (pattern, handler). Each route is named after its handler.
const VIEWS: &[(&str, &str)] = &[
    (r"^network/$", "network"),
    (r"^pathway/$", "pathway"),
    (r"^table/$", "table"),
    (r"^test/$", "qtests"),
    (r"^node_query/$", "node_query"),
    (r"^multi_node_query/$", "multi_node_query"),
    (r"^fullfill_node_query/$", "fullfill_node_query"),
    (r"^copy_nodes/$", "copy_nodes"),
    (r"^get_data/$", "get_data"),
    (r"^get_default_parameters/$", "get_default_parameters"),
    (r"^get_graph/$", "get_graph"),
    (r"^match_(?P<match_type>\w+)/$", "get_match"),
    (r"^get_sample_rels/$", "get_sample_rels"),
    (r"^save_parameters/$", "save_parameters"),
    (r"^load_parameters/$", "load_parameters"),
    (r"^password/$", "password"),
];

/// Build the route table for the given application settings.
pub fn hitwalker_routes(app: &AppConfig) -> Result<Vec<Route>, BuildError> {
    let mut routes = Vec::with_capacity(INDEX_ALIASES.len() + VIEWS.len() + 2);

    for (pattern, retry_message, name) in INDEX_ALIASES {
        routes.push(
            Route::new(pattern, "index")?
                .param("retry_message", *retry_message)
                .named(*name),
        );
    }

    for (pattern, handler) in VIEWS {
        routes.push(Route::new(pattern, *handler)?.named(*handler));
    }

    routes.push(
        Route::new(r"^login/$", LOGIN_HANDLER)?
            .param("template_name", app.login_template.clone())
            .param(
                "extra_context",
                json!({
                    "prog_type": app.prog_type,
                    "username": app.guest_username,
                }),
            ),
    );

    routes.push(
        Route::new(r"^logout/$", LOGOUT_HANDLER)?
            .param("login_url", format!("{}/HitWalker2/login/", app.prog_type)),
    );

    Ok(routes)
}
