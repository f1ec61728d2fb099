//! URL path templates of the functions API.
//!
//! These must match the server byte for byte.

use laos_core::{AppName, ProjectId, RoutePath};

/// `/v1/{project_id}/apps/{app}/routes`
#[must_use]
pub fn routes_collection(project: &ProjectId, app: &AppName) -> String {
    format!("/v1/{project}/apps/{app}/routes")
}

/// `/v1/{project_id}/apps/{app}/routes{route_path}`
#[must_use]
pub fn route(project: &ProjectId, app: &AppName, path: &RoutePath) -> String {
    format!("/v1/{project}/apps/{app}/routes{path}")
}

/// `/v1/r/{app}{route_path}`
///
/// The project id is not part of this path even though private routes are
/// project-scoped. Kept as the deployed server expects it.
#[must_use]
pub fn private_execution(app: &AppName, path: &RoutePath) -> String {
    format!("/v1/r/{app}{path}")
}

/// `/r/{app}{route_path}`
#[must_use]
pub fn public_execution(app: &AppName, path: &RoutePath) -> String {
    format!("/r/{app}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> RoutePath {
        match RoutePath::new(raw) {
            Ok(p) => p,
            Err(e) => panic!("invalid test path: {e}"),
        }
    }

    #[test]
    fn templates_match_server_layout() {
        let project = ProjectId::new("p1");
        let app = AppName::new("demo");
        let hello = path("/hello");
        assert_eq!(routes_collection(&project, &app), "/v1/p1/apps/demo/routes");
        assert_eq!(route(&project, &app, &hello), "/v1/p1/apps/demo/routes/hello");
        assert_eq!(private_execution(&app, &hello), "/v1/r/demo/hello");
        assert_eq!(public_execution(&app, &hello), "/r/demo/hello");
    }

    proptest::proptest! {
        #[test]
        fn proptest_execution_paths_are_unscoped(
            app in "[a-z][a-z0-9-]{0,15}",
            seg in "[a-z0-9]{1,12}",
        ) {
            let app = AppName::new(app);
            let route_path = path(&format!("/{seg}"));
            let private = private_execution(&app, &route_path);
            let public = public_execution(&app, &route_path);
            proptest::prop_assert_eq!(private, format!("/v1/r/{app}{route_path}"));
            proptest::prop_assert_eq!(public, format!("/r/{app}{route_path}"));
        }

        #[test]
        fn proptest_route_path_extends_collection(
            project in "[a-z0-9]{1,16}",
            app in "[a-z0-9-]{1,16}",
            seg in "[a-z0-9/_-]{0,24}",
        ) {
            let project = ProjectId::new(project);
            let app = AppName::new(app);
            let route_path = path(&format!("/{seg}"));
            let single = route(&project, &app, &route_path);
            let collection = routes_collection(&project, &app);
            proptest::prop_assert_eq!(single, format!("{collection}{route_path}"));
        }
    }
}
