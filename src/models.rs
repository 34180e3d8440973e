use std::convert::Infallible;

/// Coarse capability label of a user.
///
/// Labels other than the known ones are kept verbatim.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Role {
    Admin,
    Waiter,
    Customer,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Waiter => "waiter",
            Role::Customer => "customer",
            Role::Other(label) => label.as_str(),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        // `garcom` and `cliente` are the labels of the first deployment.
        match value.trim() {
            "admin" => Role::Admin,
            "waiter" | "garcom" => Role::Waiter,
            "customer" | "cliente" => Role::Customer,
            other => Role::Other(other.to_owned()),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Role::from(value.as_str()))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrderType {
    Waiter,
    Customer,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Waiter => "waiter",
            OrderType::Customer => "customer",
        }
    }
}

impl TryFrom<String> for OrderType {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(match Role::from(value.as_str()) {
            Role::Waiter => OrderType::Waiter,
            _ => OrderType::Customer,
        })
    }
}

#[derive(Debug, PartialEq, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    #[sqlx(rename = "nome")]
    pub name: String,
    pub email: String,
    #[sqlx(rename = "senha")]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
}

#[derive(Debug, PartialEq, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: i32,
    #[sqlx(rename = "mesa")]
    pub table: Option<String>,
    #[sqlx(rename = "itens")]
    pub items: serde_json::Value,
    pub total: f64,
    #[sqlx(rename = "tipo", try_from = "String")]
    pub order_type: OrderType,
    pub status: String,
}

#[derive(Debug, PartialEq, Clone, sqlx::FromRow)]
pub struct Coupon {
    pub id: i32,
    #[sqlx(rename = "codigo")]
    pub code: String,
    #[sqlx(rename = "desconto")]
    pub discount: f64,
}

#[derive(Debug, PartialEq, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    #[sqlx(rename = "nome")]
    pub name: String,
    #[sqlx(rename = "preco")]
    pub price: f64,
    #[sqlx(rename = "descricao")]
    pub description: Option<String>,
    #[sqlx(rename = "imagem")]
    pub image: Option<String>,
}

/// Which callers may use the product routes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProductAuthPolicy {
    Public,
    Token,
}

impl From<&str> for ProductAuthPolicy {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("token") {
            ProductAuthPolicy::Token
        } else {
            ProductAuthPolicy::Public
        }
    }
}
