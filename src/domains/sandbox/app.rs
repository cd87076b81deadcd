//! Resources under `app://self`.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::core::{Error, Result};
use crate::domains::resources::{
    Args, Binder, Code, ContextKey, MethodSignature, ResourceDefinition, ResourceObject, Response,
    Verb,
};

/// `app://self/user`: a fixed table of users.
#[derive(Debug, Clone)]
pub struct User {
    users: Vec<Value>,
}

impl User {
    pub fn new() -> Self {
        Self {
            users: vec![
                json!({"id": 1, "name": "Athos", "age": 15, "blog_id": 0}),
                json!({"id": 2, "name": "Aramis", "age": 16, "blog_id": 12}),
                json!({"id": 3, "name": "Porthos", "age": 17, "blog_id": 0}),
            ],
        }
    }

    fn on_get(&self, id: usize) -> Result<Response> {
        self.users
            .get(id)
            .cloned()
            .map(Response::ok)
            .ok_or_else(|| Error::application(format!("Unknown user id: {}", id)))
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceObject for User {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![
            MethodSignature::new(Verb::Get).required("id"),
            MethodSignature::new(Verb::Post)
                .required("id")
                .optional("name", json!("default_name"))
                .optional("age", json!(99)),
            MethodSignature::new(Verb::Put)
                .required("id")
                .required("name")
                .required("age"),
            MethodSignature::new(Verb::Patch).required("id").required("name"),
        ]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => self.on_get(args.get(0)?),
            Verb::Post => Ok(json!(format!(
                "post user[{} {} {}]",
                args.get::<u64>(0)?,
                args.get::<String>(1)?,
                args.get::<u64>(2)?
            ))
            .into()),
            Verb::Put => Ok(json!(format!(
                "put user[{} {} {}]",
                args.get::<u64>(0)?,
                args.get::<String>(1)?,
                args.get::<u64>(2)?
            ))
            .into()),
            Verb::Patch => Ok(json!(format!(
                "patch user[{} {}]",
                args.get::<u64>(0)?,
                args.get::<String>(1)?
            ))
            .into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for User {
    const NAME: &'static str = "Sandbox::Resource::App::User";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Self::new())
    }
}

/// `app://self/restbucks/order`
#[derive(Debug, Clone, Copy, Default)]
pub struct Order;

impl ResourceObject for Order {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![
            MethodSignature::new(Verb::Get).optional("id", json!(1)),
            MethodSignature::new(Verb::Post).required("drink"),
        ]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => {
                let id = args.get::<u64>(0)?;
                Ok(json!({"id": id, "drink": "latte", "status": "brewing"}).into())
            }
            Verb::Post => {
                let drink = args.get::<String>(0)?;
                Ok(Response::new(Code::CREATED)
                    .with_header("Location", "app://self/restbucks/order?id=1")
                    .with_body(json!({"id": 1, "drink": drink})))
            }
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Order {
    const NAME: &'static str = "Sandbox::Resource::App::Restbucks::Order";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Order)
    }
}

/// `app://self/weave/book`
#[derive(Debug, Clone, Copy, Default)]
pub struct Book;

impl ResourceObject for Book {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![MethodSignature::new(Verb::Get).required("id")]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => Ok(json!(format!("book id[{}]", plain(args.value(0)?))).into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Book {
    const NAME: &'static str = "Sandbox::Resource::App::Weave::Book";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Book)
    }
}

/// `app://self/blog`
#[derive(Debug, Clone, Copy, Default)]
pub struct Blog;

impl ResourceObject for Blog {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![MethodSignature::new(Verb::Get).required("id")]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => {
                let id = args.get::<u64>(0)?;
                Ok(json!({"id": id, "title": format!("blog {}", id)}).into())
            }
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Blog {
    const NAME: &'static str = "Sandbox::Resource::App::Blog";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Blog)
    }
}

/// `app://self/factory/news`
#[derive(Debug, Clone, Copy, Default)]
pub struct FactoryNews;

impl ResourceObject for FactoryNews {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![MethodSignature::new(Verb::Get)]
    }

    fn call(&self, verb: Verb, _args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => Ok(json!({"headline": "app news"}).into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for FactoryNews {
    const NAME: &'static str = "Sandbox::Resource::App::Factory::News";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(FactoryNews)
    }
}

/// Connection settings handed to [`Account`] by the binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub dsn: String,
}

/// `app://self/account`: reads its `db` argument from the binder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Account;

impl ResourceObject for Account {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![
            MethodSignature::new(Verb::Get)
                .required("id")
                .required("db")
                .assisted(["db"]),
        ]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => {
                let id = args.get::<u64>(0)?;
                let db: Arc<Database> = args.instance(1)?;
                Ok(json!({"id": id, "dsn": db.dsn}).into())
            }
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Account {
    const NAME: &'static str = "Sandbox::Resource::App::Account";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Account)
    }
}

/// `app://self/session`: reads ambient cookie and server values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Session;

impl ResourceObject for Session {
    fn methods(&self) -> Vec<MethodSignature> {
        vec![
            MethodSignature::new(Verb::Get)
                .required("token")
                .optional("lang", json!("en"))
                .web_context("token", ContextKey::cookie("token"))
                .web_context("lang", ContextKey::server("HTTP_ACCEPT_LANGUAGE")),
        ]
    }

    fn call(&self, verb: Verb, args: &Args) -> Result<Response> {
        match verb {
            Verb::Get => Ok(json!({"token": args.value(0)?, "lang": args.value(1)?}).into()),
            _ => Err(Error::method_not_allowed(verb, self.type_name())),
        }
    }
}

impl ResourceDefinition for Session {
    const NAME: &'static str = "Sandbox::Resource::App::Session";

    fn build(_binder: &dyn Binder) -> Result<Self> {
        Ok(Session)
    }
}

/// Render a scalar without JSON string quotes.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
