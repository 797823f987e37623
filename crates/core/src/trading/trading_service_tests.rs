use crate::errors::{Error, Result, TradingError, ValidationError};
use crate::quotes::{Quote, QuoteServiceTrait};
use crate::trading::{
    settle, AccountSnapshot, ExecutedTrade, LedgerRepositoryTrait, LedgerSnapshot, TradeOrder,
    TradeRequest, TradeSide, TradingService, TradingServiceTrait, Transaction,
};
use async_trait::async_trait;
use chrono::Utc;
use papertrade_market_data::MarketDataError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Mock Ledger ---
struct MockLedger {
    cash: Mutex<HashMap<i32, Decimal>>,
    transactions: Mutex<Vec<Transaction>>,
}

impl MockLedger {
    fn with_user(user_id: i32, cash: Decimal) -> Self {
        Self {
            cash: Mutex::new(HashMap::from([(user_id, cash)])),
            transactions: Mutex::new(Vec::new()),
        }
    }

    fn cash_of(&self, user_id: i32) -> Decimal {
        self.cash.lock().unwrap()[&user_id]
    }

    fn count(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerRepositoryTrait for MockLedger {
    fn list_transactions(&self, user_id: i32) -> Result<Vec<Transaction>> {
        let mut list: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        list.reverse();
        Ok(list)
    }

    fn get_account_snapshot(&self, user_id: i32) -> Result<AccountSnapshot> {
        Ok(AccountSnapshot {
            cash: self.cash_of(user_id),
            transactions: self.list_transactions(user_id)?,
        })
    }

    fn held_shares(&self, user_id: i32, symbol: &str) -> Result<i64> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && t.symbol == symbol)
            .map(|t| t.shares)
            .sum())
    }

    async fn execute_trade(
        &self,
        user_id: i32,
        order: TradeOrder,
        price: Decimal,
    ) -> Result<ExecutedTrade> {
        let held_shares = self.held_shares(user_id, &order.symbol)?;
        let mut cash = self.cash.lock().unwrap();
        let balance = cash.get_mut(&user_id).expect("unknown user");
        let settlement = settle(
            LedgerSnapshot {
                cash: *balance,
                held_shares,
            },
            &order,
            price,
        )?;

        let mut transactions = self.transactions.lock().unwrap();
        let transaction = Transaction {
            id: transactions.len() as i32 + 1,
            user_id,
            symbol: order.symbol,
            shares: settlement.signed_shares,
            price,
            transacted_at: Utc::now(),
        };
        transactions.push(transaction.clone());
        *balance = settlement.cash_after;

        Ok(ExecutedTrade {
            transaction,
            cash_balance: settlement.cash_after,
            total: settlement.total,
        })
    }
}

// --- Mock QuoteService ---
struct MockQuoteService {
    prices: Mutex<HashMap<String, Decimal>>,
    lookups: Mutex<usize>,
}

impl MockQuoteService {
    fn new(prices: &[(&str, Decimal)]) -> Self {
        Self {
            prices: Mutex::new(
                prices
                    .iter()
                    .map(|(s, p)| (s.to_string(), *p))
                    .collect(),
            ),
            lookups: Mutex::new(0),
        }
    }

    fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices
            .lock()
            .unwrap()
            .insert(symbol.to_string(), price);
    }
}

#[async_trait]
impl QuoteServiceTrait for MockQuoteService {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        *self.lookups.lock().unwrap() += 1;
        let symbol = symbol.to_uppercase();
        match self.prices.lock().unwrap().get(&symbol) {
            Some(price) => Ok(Quote::new(&symbol, *price, "MOCK")),
            None => Err(MarketDataError::SymbolNotFound(symbol).into()),
        }
    }
}

const USER: i32 = 1;

fn setup(cash: Decimal) -> (TradingService, Arc<MockLedger>, Arc<MockQuoteService>) {
    let ledger = Arc::new(MockLedger::with_user(USER, cash));
    let quotes = Arc::new(MockQuoteService::new(&[
        ("NVDA", dec!(100)),
        ("AAPL", dec!(150.25)),
    ]));
    let service = TradingService::new(ledger.clone(), quotes.clone());
    (service, ledger, quotes)
}

fn request(symbol: &str, shares: &str) -> TradeRequest {
    TradeRequest {
        symbol: Some(symbol.to_string()),
        shares: Some(shares.to_string()),
    }
}

#[tokio::test]
async fn buy_then_oversell_scenario() {
    let (service, ledger, _) = setup(dec!(10000));

    let receipt = service.buy(USER, request("NVDA", "10")).await.unwrap();
    assert_eq!(receipt.side, TradeSide::Buy);
    assert_eq!(receipt.cash_balance, dec!(9000));
    assert_eq!(receipt.total, dec!(1000));
    assert_eq!(receipt.transaction.shares, 10);
    assert_eq!(receipt.transaction.price, dec!(100));
    assert_eq!(receipt.message, "Bought 10 shares of NVDA for $1,000.00");
    assert_eq!(ledger.cash_of(USER), dec!(9000));

    let err = service.sell(USER, request("NVDA", "15")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Trading(TradingError::InsufficientShares {
            requested: 15,
            held: 10,
            ..
        })
    ));
    assert_eq!(ledger.cash_of(USER), dec!(9000));
    assert_eq!(ledger.count(), 1);
}

#[tokio::test]
async fn sell_credits_cash_at_current_price() {
    let (service, ledger, quotes) = setup(dec!(10000));
    service.buy(USER, request("NVDA", "10")).await.unwrap();

    quotes.set_price("NVDA", dec!(110));
    let receipt = service.sell(USER, request("nvda", "4")).await.unwrap();

    assert_eq!(receipt.side, TradeSide::Sell);
    assert_eq!(receipt.transaction.shares, -4);
    assert_eq!(receipt.cash_balance, dec!(9440));
    assert_eq!(receipt.message, "Sold 4 shares of NVDA for $440.00");
    assert_eq!(ledger.held_shares(USER, "NVDA").unwrap(), 6);
}

#[tokio::test]
async fn insufficient_funds_leaves_state_unchanged() {
    let (service, ledger, _) = setup(dec!(1000));

    let err = service.buy(USER, request("AAPL", "7")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Trading(TradingError::InsufficientFunds { .. })
    ));
    assert_eq!(ledger.cash_of(USER), dec!(1000));
    assert_eq!(ledger.count(), 0);
}

#[tokio::test]
async fn unknown_symbol_is_reported() {
    let (service, ledger, _) = setup(dec!(1000));

    let err = service.buy(USER, request("ZZZZ", "1")).await.unwrap_err();
    assert!(matches!(err, Error::MarketData(ref e) if e.is_not_found()));
    assert_eq!(ledger.count(), 0);
}

#[tokio::test]
async fn invalid_input_never_reaches_quote_provider() {
    let (service, _, quotes) = setup(dec!(1000));

    for req in [
        request("NVDA", "0"),
        request("NVDA", "-1"),
        request("NVDA", "abc"),
        request("", "1"),
        TradeRequest::default(),
    ] {
        let err = service.buy(USER, req).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
    assert_eq!(*quotes.lookups.lock().unwrap(), 0);
}

#[tokio::test]
async fn selling_unheld_symbol_skips_quote_lookup() {
    let (service, _, quotes) = setup(dec!(1000));

    let err = service.sell(USER, request("AAPL", "1")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Trading(TradingError::InsufficientShares { held: 0, .. })
    ));
    assert_eq!(*quotes.lookups.lock().unwrap(), 0);
}

#[tokio::test]
async fn history_is_newest_first() {
    let (service, _, _) = setup(dec!(10000));
    service.buy(USER, request("NVDA", "2")).await.unwrap();
    service.buy(USER, request("AAPL", "1")).await.unwrap();
    service.sell(USER, request("NVDA", "1")).await.unwrap();

    let history = service.get_history(USER).unwrap();
    let summary: Vec<(&str, i64)> = history
        .iter()
        .map(|t| (t.symbol.as_str(), t.shares))
        .collect();
    assert_eq!(summary, vec![("NVDA", -1), ("AAPL", 1), ("NVDA", 2)]);
    assert_eq!(history[0].side(), TradeSide::Sell);
}

#[test]
fn missing_shares_is_a_validation_error() {
    let err = TradeOrder::parse(
        TradeSide::Buy,
        &TradeRequest {
            symbol: Some("NVDA".to_string()),
            shares: None,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingField(_))
    ));
}
