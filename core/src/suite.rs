//! The reqres scenarios as runnable cases.
//!
//! Expected values (totals, ids, the token) are facts about the public
//! service's seed dataset, reproduced by the mock server.

use crate::expect::Expectation;
use crate::harness::Harness;
use crate::matcher::{equal_to, has_items};
use crate::runner::Case;
use crate::types::{Credentials, UserInput};

/// Token the service hands out for its seed users.
pub const TOKEN: &str = "QpwL5tke4Pnpja7X4";

pub fn list_users(harness: &Harness) -> Case {
    Case::new(
        "list_users",
        harness.get("api/users?page=2"),
        Expectation::new()
            .status(200)
            .body("page", equal_to(2))
            .body("total", equal_to(12)),
    )
}

pub fn single_user(harness: &Harness) -> Case {
    Case::new(
        "single_user",
        harness.get("api/users/2"),
        Expectation::new()
            .status(200)
            .body("data.id", equal_to(2))
            .body("data.email", equal_to("janet.weaver@reqres.in"))
            .body("data.first_name", equal_to("Janet"))
            .body("data.last_name", equal_to("Weaver"))
            .body("support.url", equal_to("https://reqres.in/#support-heading")),
    )
}

/// Status only: the mock answers 404 with no body, the public service with
/// `{}`. `tests/integration.rs` pins the empty body against the mock.
pub fn single_user_not_found(harness: &Harness) -> Case {
    Case::new(
        "single_user_not_found",
        harness.get("api/users/23"),
        Expectation::new().status(404),
    )
}

pub fn list_resources(harness: &Harness) -> Case {
    Case::new(
        "list_resources",
        harness.get("api/unknown"),
        Expectation::new()
            .status(200)
            .body("total_pages", equal_to(2))
            .body("data.id", has_items(1..=6))
            .body("data.year", has_items(2000..=2005)),
    )
}

pub fn single_resource(harness: &Harness) -> Case {
    Case::new(
        "single_resource",
        harness.get("api/unknown/2"),
        Expectation::new()
            .status(200)
            .body("data.id", equal_to(2))
            .body("data.year", equal_to(2001)),
    )
}

/// Status only: the mock answers 404 with no body, the public service with
/// `{}`. `tests/integration.rs` pins the empty body against the mock.
pub fn single_resource_not_found(harness: &Harness) -> Case {
    Case::new(
        "single_resource_not_found",
        harness.get("api/unknown/23"),
        Expectation::new().status(404),
    )
}

pub fn create_user(harness: &Harness) -> Case {
    Case::new(
        "create_user",
        harness
            .post("api/users")
            .json(&UserInput::new("morpheus", "leader")),
        Expectation::new()
            .status(201)
            .body("name", equal_to("morpheus"))
            .body("job", equal_to("leader")),
    )
}

pub fn update_user(harness: &Harness) -> Case {
    Case::new(
        "update_user",
        harness
            .put("api/users/2")
            .json(&UserInput::new("morpheus", "zion resident")),
        Expectation::new()
            .status(200)
            .body("name", equal_to("morpheus"))
            .body("job", equal_to("zion resident")),
    )
}

pub fn patch_user(harness: &Harness) -> Case {
    Case::new(
        "patch_user",
        harness
            .patch("api/users/2")
            .json(&UserInput::new("morpheus", "zion resident")),
        Expectation::new()
            .status(200)
            .body("name", equal_to("morpheus"))
            .body("job", equal_to("zion resident")),
    )
}

pub fn delete_user(harness: &Harness) -> Case {
    Case::new(
        "delete_user",
        harness.delete("api/users/2"),
        Expectation::new().status(204).empty_body(),
    )
}

pub fn register_successful(harness: &Harness) -> Case {
    Case::new(
        "register_successful",
        harness
            .post("api/register")
            .json(&Credentials::new("eve.holt@reqres.in", "pistol")),
        Expectation::new()
            .status(200)
            .body("id", equal_to(4))
            .body("token", equal_to(TOKEN)),
    )
}

pub fn register_unsuccessful(harness: &Harness) -> Case {
    Case::new(
        "register_unsuccessful",
        harness
            .post("api/register")
            .json(&Credentials::email_only("sydney@fife")),
        Expectation::new()
            .status(400)
            .body("error", equal_to("Missing password")),
    )
}

pub fn login_successful(harness: &Harness) -> Case {
    Case::new(
        "login_successful",
        harness
            .post("api/login")
            .json(&Credentials::new("eve.holt@reqres.in", "cityslicka")),
        Expectation::new().status(200).body("token", equal_to(TOKEN)),
    )
}

pub fn login_unsuccessful(harness: &Harness) -> Case {
    Case::new(
        "login_unsuccessful",
        harness
            .post("api/login")
            .json(&Credentials::email_only("peter@klaven")),
        Expectation::new()
            .status(400)
            .body("error", equal_to("Missing password")),
    )
}

/// The service sleeps `delay` seconds before answering; the client must wait.
pub fn delayed_response(harness: &Harness) -> Case {
    Case::new(
        "delayed_response",
        harness.get("api/users?delay=3"),
        Expectation::new()
            .status(200)
            .body("data.id", has_items(1..=6))
            .body("page", equal_to(1))
            .body("per_page", equal_to(6))
            .body("total", equal_to(12)),
    )
}

/// Every scenario, in the order they are usually listed.
pub fn all(harness: &Harness) -> Vec<Case> {
    vec![
        list_users(harness),
        single_user(harness),
        single_user_not_found(harness),
        list_resources(harness),
        single_resource(harness),
        single_resource_not_found(harness),
        create_user(harness),
        update_user(harness),
        patch_user(harness),
        delete_user(harness),
        register_successful(harness),
        register_unsuccessful(harness),
        login_successful(harness),
        login_unsuccessful(harness),
        delayed_response(harness),
    ]
}
