//! Resources whose parameters are bound to other resources.

use serde_json::{Value, json};

use crate::core::{Error, Result};
use crate::domains::resources::{
    Args, Binder, MethodSignature, ResourceDefinition, ResourceObject, Response, Verb,
};

/// `app://self/rparam/login`
#[derive(Debug, Clone, Copy, Default)]
pub struct Login;

impl ResourceObject for Login {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![MethodSignature::new(Verb::Get).optional("name", json!("guest"))]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => {
                let name = args.get::<String>(0)?;
                Ok(json!({"login_id": name, "nickname": format!("nick:{}", name)}).into())
            }
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Login {
    const NAME: &'static str = "Sandbox::Resource::App::Rparam::Login";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Login)
    }
}

/// `app://self/rparam/greeting`
#[derive(Debug, Clone, Copy, Default)]
pub struct Greeting;

impl ResourceObject for Greeting {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![
            MethodSignature::new(Verb::Get)
                .optional("name", Value::Null)
                .resource_param("name", "app://self/rparam/login#login_id"),
            MethodSignature::new(Verb::Post)
                .required("id")
                .required("name")
                .templated_resource_param("id", "app://self/rparam/login{?name}#nickname"),
            MethodSignature::new(Verb::Put).required("name"),
        ]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => Ok(json!({"name": args.value(0)?}).into()),
            Verb::Post => Ok(json!({"id": args.value(0)?, "name": args.value(1)?}).into()),
            Verb::Put => Ok(json!({"name": args.value(0)?}).into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Greeting {
    const NAME: &'static str = "Sandbox::Resource::App::Rparam::Greeting";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Greeting)
    }
}

/// `app://self/rparam/cycle`: its only parameter is bound to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cycle;

impl ResourceObject for Cycle {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![
            MethodSignature::new(Verb::Get)
                .required("next")
                .resource_param("next", "app://self/rparam/cycle#next"),
        ]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => Ok(json!({"next": args.value(0)?}).into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Cycle {
    const NAME: &'static str = "Sandbox::Resource::App::Rparam::Cycle";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Cycle)
    }
}
