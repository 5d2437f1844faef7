use crate::configuration::Route;
use crate::interrogation::{Context, Interrogator};
use log::debug;

/// Keeps the host routes whose controller lives under a configured namespace.
pub struct RoutesInterrogator;

impl Interrogator for RoutesInterrogator {
    fn interrogate_routes(&self, ctx: &Context<'_>) -> Vec<Route> {
        let routes: Vec<Route> = ctx
            .host
            .routes()
            .into_iter()
            .filter(|r| ctx.global.namespace_of(&r.controller).is_some())
            .map(|r| Route {
                controller_path: r.controller,
                action: r.action,
                verb: strip_anchors(&r.verb),
                path: r.path,
            })
            .collect();

        debug!(
            "Found {} routes under namespaces {:?}",
            routes.len(),
            ctx.global.namespaces
        );
        routes
    }
}

/// Remove regex anchors from a route verb (`^GET$` -> `GET`)
fn strip_anchors(verb: &str) -> String {
    verb.chars().filter(|c| *c != '^' && *c != '$').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::GlobalConfig;
    use crate::interrogation::test_support::FakeHost;
    use crate::translator::Translator;

    #[test]
    fn test_only_namespaced_routes_are_kept() {
        let host = FakeHost::widgets();
        let mut global = GlobalConfig::new("Widgets");
        global.namespaces = vec!["api".to_string()];
        let translator = Translator::new("en");
        let ctx = Context {
            global: &global,
            host: &host,
            translator: &translator,
        };

        let routes = RoutesInterrogator.interrogate_routes(&ctx);

        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.controller_path == "api/widgets"));
        assert_eq!(routes[0].verb, "GET");
        assert_eq!(routes[0].path, "/api/widgets(.:format)");
    }

    #[test]
    fn test_multiple_namespaces() {
        let host = FakeHost::widgets();
        let mut global = GlobalConfig::new("Widgets");
        global.namespaces = vec!["api".to_string(), "admin".to_string()];
        let translator = Translator::new("en");
        let ctx = Context {
            global: &global,
            host: &host,
            translator: &translator,
        };

        let routes = RoutesInterrogator.interrogate_routes(&ctx);
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[2].controller_path, "admin/users");
    }

    #[test]
    fn test_strip_anchors() {
        assert_eq!(strip_anchors("^GET$"), "GET");
        assert_eq!(strip_anchors("^PATCH|PUT$"), "PATCH|PUT");
        assert_eq!(strip_anchors(""), "");
    }
}
