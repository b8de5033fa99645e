//! Reqwest-backed eligibility checker.
//!
//! Calls `GET {base}/users/{cpf}` and expects
//! `{"status": "ABLE_TO_VOTE" | "UNABLE_TO_VOTE"}`. A 404 means the service
//! does not recognise the identity, which is treated as ineligible.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::reject_malformed;
use crate::domain::Cpf;
use crate::domain::ports::{Eligibility, EligibilityCheckError, EligibilityChecker};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum VoterStatus {
    AbleToVote,
    UnableToVote,
}

#[derive(Debug, Deserialize)]
struct VoterStatusDto {
    status: VoterStatus,
}

/// Eligibility adapter querying a remote voter-status service.
pub struct HttpEligibilityChecker {
    client: Client,
    base: Url,
}

impl HttpEligibilityChecker {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn user_url(&self, cpf: &Cpf) -> Result<Url, EligibilityCheckError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                EligibilityCheckError::unavailable(format!(
                    "eligibility base URL cannot carry a path: {}",
                    self.base
                ))
            })?
            .pop_if_empty()
            .extend(["users", cpf.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl EligibilityChecker for HttpEligibilityChecker {
    async fn check(&self, cpf: &Cpf) -> Result<Eligibility, EligibilityCheckError> {
        if let Some(verdict) = reject_malformed(cpf) {
            return Ok(verdict);
        }

        let response = self
            .client
            .get(self.user_url(cpf)?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        let verdict = verdict_for(status, body.as_ref())?;
        debug!(?verdict, status = status.as_u16(), "remote eligibility verdict");
        Ok(verdict)
    }
}

fn verdict_for(status: StatusCode, body: &[u8]) -> Result<Eligibility, EligibilityCheckError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(Eligibility::Ineligible);
    }
    if !status.is_success() {
        return Err(EligibilityCheckError::unavailable(format!(
            "status {}",
            status.as_u16()
        )));
    }

    let decoded: VoterStatusDto = serde_json::from_slice(body).map_err(|error| {
        EligibilityCheckError::invalid_response(format!("invalid voter status payload: {error}"))
    })?;
    Ok(match decoded.status {
        VoterStatus::AbleToVote => Eligibility::Eligible,
        VoterStatus::UnableToVote => Eligibility::Ineligible,
    })
}

fn map_transport_error(error: reqwest::Error) -> EligibilityCheckError {
    if error.is_timeout() {
        EligibilityCheckError::unavailable(format!("request timed out: {error}"))
    } else {
        EligibilityCheckError::unavailable(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Mapping helpers plus one round trip against a local actix listener.

    use actix_web::{App, HttpResponse, HttpServer, web};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StatusCode::OK, r#"{"status":"ABLE_TO_VOTE"}"#, Eligibility::Eligible)]
    #[case(StatusCode::OK, r#"{"status":"UNABLE_TO_VOTE"}"#, Eligibility::Ineligible)]
    #[case(StatusCode::NOT_FOUND, "", Eligibility::Ineligible)]
    fn maps_known_answers(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: Eligibility,
    ) {
        assert_eq!(verdict_for(status, body.as_bytes()), Ok(expected));
    }

    #[rstest]
    #[case(StatusCode::OK, r#"{"status":"MAYBE"}"#)]
    #[case(StatusCode::OK, "not json")]
    fn unknown_payloads_are_invalid(#[case] status: StatusCode, #[case] body: &str) {
        assert!(matches!(
            verdict_for(status, body.as_bytes()),
            Err(EligibilityCheckError::InvalidResponse { .. })
        ));
    }

    #[rstest]
    #[case(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(StatusCode::TOO_MANY_REQUESTS)]
    fn failing_statuses_are_unavailable(#[case] status: StatusCode) {
        assert!(matches!(
            verdict_for(status, b""),
            Err(EligibilityCheckError::Unavailable { .. })
        ));
    }

    #[rstest]
    #[case("http://voters.test", "http://voters.test/users/52998224725")]
    #[case("http://voters.test/api/", "http://voters.test/api/users/52998224725")]
    fn builds_user_url(#[case] base: &str, #[case] expected: &str) {
        let checker = HttpEligibilityChecker::new(
            Url::parse(base).expect("valid URL"),
            Duration::from_secs(1),
        )
        .expect("client builds");
        let url = checker
            .user_url(&Cpf::normalize("52998224725"))
            .expect("url builds");
        assert_eq!(url.as_str(), expected);
    }

    async fn voter_status(path: web::Path<String>) -> HttpResponse {
        match path.as_str() {
            "52998224725" => HttpResponse::Ok().json(serde_json::json!({"status": "ABLE_TO_VOTE"})),
            "11144477735" => {
                HttpResponse::Ok().json(serde_json::json!({"status": "UNABLE_TO_VOTE"}))
            }
            _ => HttpResponse::NotFound().finish(),
        }
    }

    #[actix_rt::test]
    async fn queries_remote_service() {
        let server = HttpServer::new(|| {
            App::new().route("/users/{cpf}", web::get().to(voter_status))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind listener");
        let addr = *server.addrs().first().expect("bound address");
        let running = server.run();
        let handle = running.handle();
        actix_rt::spawn(running);

        let checker = HttpEligibilityChecker::new(
            Url::parse(&format!("http://{addr}")).expect("valid URL"),
            Duration::from_secs(5),
        )
        .expect("client builds");

        let able = checker.check(&Cpf::normalize("529.982.247-25")).await;
        let unable = checker.check(&Cpf::normalize("111.444.777-35")).await;
        let unknown = checker.check(&Cpf::normalize("123.456.789-09")).await;
        handle.stop(true).await;

        assert_eq!(able, Ok(Eligibility::Eligible));
        assert_eq!(unable, Ok(Eligibility::Ineligible));
        assert_eq!(unknown, Ok(Eligibility::Ineligible));
    }
}
