use crate::configuration::{ActionConfig, ControllerConfig, Route};
use crate::host::ScopeDefinition;
use crate::inflect::capitalize;
use crate::interrogation::{Context, Interrogator};

/// Fills an action record from its route; index actions also get their GET
/// scope parameters.
pub struct ActionInterrogator;

impl Interrogator for ActionInterrogator {
    fn interrogate_action(
        &self,
        ctx: &Context<'_>,
        controller: &ControllerConfig,
        route: &Route,
        config: &mut ActionConfig,
    ) {
        config.action = route.action.clone();
        config.controller_path = controller.path.clone();
        config.verb = route.verb.clone();
        config.pathspec = json_pathspec(&route.path);
        config.description = action_description(ctx, controller, &config.action);

        if config.action == "index" {
            config.scopes = ctx
                .host
                .scopes(&controller.path)
                .iter()
                .flat_map(|scope| scope_entries(ctx, controller, scope))
                .collect();
        }
    }
}

/// Rewrite the optional format segment of a path spec to `.json`
pub fn json_pathspec(path: &str) -> String {
    path.replace("(.:format)", ".json").replace(".:format", ".json")
}

fn entity(controller: &ControllerConfig) -> String {
    format!("controllers.{}", controller.path)
}

fn action_description(ctx: &Context<'_>, controller: &ControllerConfig, action: &str) -> Option<String> {
    let params = ctx.resource_params(controller).with("action", capitalize(action));
    ctx.translator
        .resolve("actions", &entity(controller), action, &params)
}

/// One entry per GET parameter; `hash` scopes expand into `name[key]` entries.
fn scope_entries(
    ctx: &Context<'_>,
    controller: &ControllerConfig,
    scope: &ScopeDefinition,
) -> Vec<(String, Option<String>)> {
    let names: Vec<String> = if scope.scope_type == "hash" {
        scope
            .using
            .iter()
            .map(|key| format!("{}[{}]", scope.name, key))
            .collect()
    } else {
        vec![scope.name.clone()]
    };

    names
        .into_iter()
        .map(|name| {
            let params = ctx
                .resource_params(controller)
                .with("scope_name", name.clone())
                .with("scope_default", scope.default.clone().unwrap_or_default())
                .with("type", scope.scope_type.clone());
            let description = ctx
                .translator
                .resolve("scopes", &entity(controller), &name, &params);
            (name, description)
        })
        .collect()
}
