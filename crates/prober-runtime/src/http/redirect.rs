use reqwest::redirect::Policy;
use reqwest::Url;
use tracing::debug;

/// Longest redirect chain followed before giving up
pub const MAX_REDIRECTS: usize = 10;

/// How the HTTP client treats redirect responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Follow every redirect, up to [`MAX_REDIRECTS`]
    FollowAll,
    /// Follow only redirects that stay on the first request's hostname.
    /// Anything else ends the chain and hands back the 3xx response.
    SameHostOnly,
}

/// What to do with one redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RedirectDecision {
    Follow,
    Stop,
    TooManyRedirects,
}

impl RedirectPolicy {
    pub fn new(follow_non_local_redirects: bool) -> Self {
        if follow_non_local_redirects {
            RedirectPolicy::FollowAll
        } else {
            RedirectPolicy::SameHostOnly
        }
    }

    /// Decide on a redirect to `next`, given the URLs already requested in
    /// this chain (oldest first).
    pub(crate) fn decide(&self, next: &Url, previous: &[Url]) -> RedirectDecision {
        if *self == RedirectPolicy::SameHostOnly {
            if let Some(first) = previous.first() {
                if next.host_str() != first.host_str() {
                    return RedirectDecision::Stop;
                }
            }
        }
        if previous.len() >= MAX_REDIRECTS {
            return RedirectDecision::TooManyRedirects;
        }
        RedirectDecision::Follow
    }

    /// Install this policy on a reqwest client
    pub fn into_policy(self) -> Policy {
        Policy::custom(move |attempt| match self.decide(attempt.url(), attempt.previous()) {
            RedirectDecision::Follow => attempt.follow(),
            RedirectDecision::Stop => {
                debug!("Not following redirect to non-local host {}", attempt.url());
                attempt.stop()
            }
            RedirectDecision::TooManyRedirects => {
                attempt.error(format!("stopped after {} redirects", MAX_REDIRECTS))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn chain(len: usize) -> Vec<Url> {
        (0..len)
            .map(|i| url(&format!("http://10.0.0.1:8080/hop/{}", i)))
            .collect()
    }

    #[test]
    fn test_same_host_follows_local_redirect() {
        let policy = RedirectPolicy::new(false);
        let decision = policy.decide(&url("http://10.0.0.1:8080/new"), &chain(1));
        assert_eq!(decision, RedirectDecision::Follow);
    }

    #[test]
    fn test_same_host_ignores_port() {
        let policy = RedirectPolicy::SameHostOnly;
        let decision = policy.decide(&url("http://10.0.0.1:9090/other"), &chain(1));
        assert_eq!(decision, RedirectDecision::Follow);
    }

    #[test]
    fn test_same_host_stops_on_other_host() {
        let policy = RedirectPolicy::new(false);
        let decision = policy.decide(&url("http://example.com/"), &chain(3));
        assert_eq!(decision, RedirectDecision::Stop);
    }

    #[test]
    fn test_follow_all_follows_other_host() {
        let policy = RedirectPolicy::new(true);
        let decision = policy.decide(&url("http://example.com/"), &chain(1));
        assert_eq!(decision, RedirectDecision::Follow);
    }

    #[test]
    fn test_chain_cap_applies_to_both_policies() {
        for policy in [RedirectPolicy::FollowAll, RedirectPolicy::SameHostOnly] {
            let next = url("http://10.0.0.1:8080/loop");
            assert_eq!(
                policy.decide(&next, &chain(MAX_REDIRECTS - 1)),
                RedirectDecision::Follow
            );
            assert_eq!(
                policy.decide(&next, &chain(MAX_REDIRECTS)),
                RedirectDecision::TooManyRedirects
            );
        }
    }
}
