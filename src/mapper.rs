//! Provider capability registry.
//!
//! Which symbols and currencies each provider can serve, and under which
//! provider-specific id. Coverage is partial: a missing entry is the only
//! way to say "not supported". Placeholder ids are never stored, and the
//! `Unmapped` sentinels are never keys.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::model::{CapabilityError, Currency, Provider, Symbol};

static SYMBOL_IDS: OnceLock<HashMap<(Provider, Symbol), &'static str>> = OnceLock::new();
static CURRENCY_IDS: OnceLock<HashMap<(Provider, Currency), &'static str>> = OnceLock::new();

// Binance and Kraken are declared in `Provider` but carry no entries yet;
// every lookup against them is a capability miss.
fn symbol_ids() -> &'static HashMap<(Provider, Symbol), &'static str> {
    SYMBOL_IDS.get_or_init(|| {
        HashMap::from([
            ((Provider::Coingecko, Symbol::Btc), "bitcoin"),
            ((Provider::Coingecko, Symbol::Xrp), "ripple"),
            ((Provider::Coingecko, Symbol::Eth), "ethereum"),
        ])
    })
}

fn currency_ids() -> &'static HashMap<(Provider, Currency), &'static str> {
    CURRENCY_IDS.get_or_init(|| {
        HashMap::from([
            ((Provider::Coingecko, Currency::Usd), "usd"),
            ((Provider::Coingecko, Currency::Eur), "eur"),
            ((Provider::Coingecko, Currency::Gbp), "gbp"),
            ((Provider::Coingecko, Currency::Aud), "aud"),
            ((Provider::Coingecko, Currency::Chf), "chf"),
            ((Provider::Coingecko, Currency::Jpy), "jpy"),
        ])
    })
}

/// Resolves the provider-specific id for a symbol.
pub fn map_symbol(symbol: Symbol, provider: Provider) -> Result<&'static str, CapabilityError> {
    symbol_ids()
        .get(&(provider, symbol))
        .copied()
        .ok_or(CapabilityError::Symbol { symbol, provider })
}

/// Resolves the provider-specific id for a currency.
pub fn map_currency(
    currency: Currency,
    provider: Provider,
) -> Result<&'static str, CapabilityError> {
    currency_ids()
        .get(&(provider, currency))
        .copied()
        .ok_or(CapabilityError::Currency { currency, provider })
}
