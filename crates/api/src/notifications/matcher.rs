//! Donor/request matching and notification fan-out.
//!
//! When a blood request is created, [`DonorMatcher`] looks up every donor
//! account whose blood group and district equal the request's exactly and
//! mints one `request` notification per donor. Matching is strictly
//! equality-based: no compatibility expansion (an O- donor is not matched
//! to an A+ request), no geographic radius.

use futures::future::join_all;

use rokto_core::blood::BloodGroup;
use rokto_core::kinds::KIND_REQUEST;
use rokto_core::types::DbId;
use rokto_db::repositories::ProfileRepo;
use rokto_db::DbPool;

use crate::notifications::NotificationService;

/// Fixed title for request fan-out notifications.
const FANOUT_TITLE: &str = "Emergency Blood Request";

/// Navigation target for request fan-out notifications: the requests view.
const FANOUT_LINK: &str = "/requests";

/// Fans a new blood request out to matching donors.
///
/// The matcher deliberately favours availability of the request-creation
/// path over completeness of delivery: it never returns an error, never
/// rolls back a partial fan-out, and performs no deduplication — invoking
/// it twice for the same request mints duplicate notifications.
#[derive(Clone)]
pub struct DonorMatcher {
    pool: DbPool,
    notifier: NotificationService,
}

impl DonorMatcher {
    /// Create a matcher over the shared pool and notification service.
    pub fn new(pool: DbPool, notifier: NotificationService) -> Self {
        Self { pool, notifier }
    }

    /// Notify every eligible donor about a newly persisted request.
    ///
    /// Eligibility is evaluated at call time: role = donor, available,
    /// identical blood group, identical district. The donor lookup
    /// completes before any write is issued; the writes themselves are
    /// issued concurrently with no ordering guarantee among them, and the
    /// call returns once every write has been acknowledged or failed.
    ///
    /// Failures are logged and swallowed at both stages: a lookup error
    /// produces zero notifications, an individual write error skips that
    /// donor and the batch continues. The caller can always treat the
    /// request creation as successful.
    pub async fn notify_matching_donors(
        &self,
        blood_group: BloodGroup,
        district: &str,
        request_id: DbId,
    ) {
        let donors = match ProfileRepo::find_available_donors(&self.pool, blood_group, district)
            .await
        {
            Ok(donors) => donors,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    request_id,
                    %blood_group,
                    district,
                    "Donor lookup failed, skipping notification fan-out"
                );
                return;
            }
        };

        let body =
            format!("A new {blood_group} blood request has been posted in {district}.");

        let writes = donors.iter().map(|donor| {
            self.notifier
                .create(donor.id, FANOUT_TITLE, &body, KIND_REQUEST, Some(FANOUT_LINK))
        });

        let mut delivered = 0usize;
        for (donor, result) in donors.iter().zip(join_all(writes).await) {
            match result {
                Ok(_) => delivered += 1,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        request_id,
                        donor_id = donor.id,
                        "Failed to write fan-out notification"
                    );
                }
            }
        }

        tracing::info!(
            request_id,
            %blood_group,
            district,
            matched = donors.len(),
            delivered,
            "Blood request fan-out complete"
        );
    }
}
