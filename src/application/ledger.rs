//! Ledger service: the write side feeding the forecast.
//!
//! Every accepted edit is validated, persisted and then announced through the
//! configured [`ChangeNotifier`] so the spreadsheet sync can refresh.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{AdGroup, AdGroupId, AdSpendRecord, Order};
use crate::error::{Error, Result};
use crate::port::outbound::{AdGroupRepository, AdSpendRepository, ChangeNotifier, OrderRepository};

pub struct LedgerService {
    ad_groups: Arc<dyn AdGroupRepository>,
    orders: Arc<dyn OrderRepository>,
    spend: Arc<dyn AdSpendRepository>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl LedgerService {
    pub fn new(
        ad_groups: Arc<dyn AdGroupRepository>,
        orders: Arc<dyn OrderRepository>,
        spend: Arc<dyn AdSpendRepository>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            ad_groups,
            orders,
            spend,
            notifier,
        }
    }

    /// Register or rename an ad group.
    ///
    /// # Errors
    /// Returns a domain error for a blank name, or a repository failure.
    pub fn upsert_ad_group(&self, group: &AdGroup) -> Result<()> {
        group.validate()?;
        self.ad_groups.upsert_ad_group(group)?;
        debug!(ad_group = %group.id, platform = %group.platform, "Ad group saved");
        self.notifier.notify();
        Ok(())
    }

    /// Record or correct an order.
    ///
    /// # Errors
    /// Returns a domain error for negative revenue,
    /// [`Error::UnknownAdGroup`] for an unregistered ad group, or a
    /// repository failure.
    pub fn upsert_order(&self, order: &Order) -> Result<()> {
        order.validate()?;
        self.ensure_known(&order.ad_group_id)?;
        self.orders.upsert_order(order)?;
        debug!(order = %order.id, ad_group = %order.ad_group_id, status = %order.status, "Order saved");
        self.notifier.notify();
        Ok(())
    }

    /// Record or correct a day's spend.
    ///
    /// # Errors
    /// Returns a domain error for negative spend,
    /// [`Error::UnknownAdGroup`] for an unregistered ad group, or a
    /// repository failure.
    pub fn upsert_spend(&self, record: &AdSpendRecord) -> Result<()> {
        record.validate()?;
        self.ensure_known(&record.ad_group_id)?;
        self.spend.upsert_spend(record)?;
        debug!(date = %record.date, ad_group = %record.ad_group_id, spend = %record.spend, "Spend saved");
        self.notifier.notify();
        Ok(())
    }

    /// # Errors
    /// Propagates repository failures.
    pub fn ad_groups(&self) -> Result<Vec<AdGroup>> {
        self.ad_groups.list_ad_groups()
    }

    fn ensure_known(&self, id: &AdGroupId) -> Result<()> {
        if self.ad_groups.ad_group_exists(id)? {
            Ok(())
        } else {
            Err(Error::UnknownAdGroup(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::{DateRange, OrderId, OrderStatus, Platform, SpendSource};
    use crate::testkit::{CountingNotifier, InMemoryStore};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn ledger(store: Arc<InMemoryStore>, notifier: Arc<CountingNotifier>) -> LedgerService {
        LedgerService::new(store.clone(), store.clone(), store, notifier)
    }

    fn group() -> AdGroup {
        AdGroup {
            id: AdGroupId::new("AG1"),
            name: "Winter sale".into(),
            platform: Platform::Facebook,
        }
    }

    fn spend(amount: rust_decimal::Decimal) -> AdSpendRecord {
        AdSpendRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            ad_group_id: AdGroupId::new("AG1"),
            spend: amount,
            source: SpendSource::Manual,
        }
    }

    #[test]
    fn accepted_edits_notify() {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(CountingNotifier::default());
        let ledger = ledger(store.clone(), notifier.clone());

        ledger.upsert_ad_group(&group()).unwrap();
        ledger.upsert_spend(&spend(dec!(100))).unwrap();
        ledger
            .upsert_order(&Order {
                id: OrderId::new("o-1"),
                ad_group_id: AdGroupId::new("AG1"),
                order_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                revenue: dec!(500),
                profit: dec!(100),
                status: OrderStatus::Pending,
            })
            .unwrap();

        assert_eq!(notifier.count(), 3);
        assert_eq!(ledger.ad_groups().unwrap(), vec![group()]);
    }

    #[test]
    fn spend_for_unknown_ad_group_is_rejected_without_notifying() {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(CountingNotifier::default());
        let ledger = ledger(store.clone(), notifier.clone());

        let err = ledger.upsert_spend(&spend(dec!(100))).unwrap_err();
        assert!(matches!(err, Error::UnknownAdGroup(id) if id == "AG1"));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn negative_spend_is_rejected() {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(CountingNotifier::default());
        let ledger = ledger(store.clone(), notifier.clone());
        ledger.upsert_ad_group(&group()).unwrap();

        let err = ledger.upsert_spend(&spend(dec!(-1))).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::NegativeSpend { .. })));
        assert_eq!(notifier.count(), 1);

        let day = DateRange::single(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(store.spend_in_range(&day, None).unwrap().is_empty());
    }

    #[test]
    fn correcting_spend_replaces_the_day() {
        let store = Arc::new(InMemoryStore::default());
        let ledger = ledger(store.clone(), Arc::new(CountingNotifier::default()));
        ledger.upsert_ad_group(&group()).unwrap();

        ledger.upsert_spend(&spend(dec!(100))).unwrap();
        ledger.upsert_spend(&spend(dec!(120))).unwrap();

        let day = DateRange::single(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let stored = store.spend_in_range(&day, None).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].spend, dec!(120));
    }
}
