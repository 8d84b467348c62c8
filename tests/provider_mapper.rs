use coinscope::mapper::{map_currency, map_symbol};
use coinscope::{CapabilityError, Currency, Provider, Symbol};

const SYMBOL_CASES: &[(Symbol, Provider, &str)] = &[
    (Symbol::Btc, Provider::Coingecko, "bitcoin"),
    (Symbol::Eth, Provider::Coingecko, "ethereum"),
    (Symbol::Xrp, Provider::Coingecko, "ripple"),
];

const CURRENCY_CASES: &[(Currency, Provider, &str)] = &[
    (Currency::Usd, Provider::Coingecko, "usd"),
    (Currency::Eur, Provider::Coingecko, "eur"),
    (Currency::Gbp, Provider::Coingecko, "gbp"),
    (Currency::Aud, Provider::Coingecko, "aud"),
    (Currency::Chf, Provider::Coingecko, "chf"),
    (Currency::Jpy, Provider::Coingecko, "jpy"),
];

#[test]
fn mapped_symbols_return_the_documented_ids() {
    for (symbol, provider, expected) in SYMBOL_CASES {
        assert_eq!(map_symbol(*symbol, *provider), Ok(*expected));
    }
}

#[test]
fn mapped_currencies_return_the_documented_ids() {
    for (currency, provider, expected) in CURRENCY_CASES {
        assert_eq!(map_currency(*currency, *provider), Ok(*expected));
    }
}

#[test]
fn the_unmapped_sentinels_are_capability_misses() {
    assert_eq!(
        map_symbol(Symbol::Unmapped, Provider::Coingecko),
        Err(CapabilityError::Symbol {
            symbol: Symbol::Unmapped,
            provider: Provider::Coingecko,
        })
    );
    assert_eq!(
        map_currency(Currency::Unmapped, Provider::Coingecko),
        Err(CapabilityError::Currency {
            currency: Currency::Unmapped,
            provider: Provider::Coingecko,
        })
    );
}

#[test]
fn providers_without_entries_miss_for_every_key() {
    for provider in [Provider::Binance, Provider::Kraken] {
        for (symbol, _, _) in SYMBOL_CASES {
            assert!(map_symbol(*symbol, provider).is_err());
        }
        for (currency, _, _) in CURRENCY_CASES {
            assert!(map_currency(*currency, provider).is_err());
        }
    }
}
