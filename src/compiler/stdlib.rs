//! Standard environment.
//!
//! Every generated program starts with these definitions, one Python
//! function per built-in the analyzer declares. `sys` is imported for the
//! lowering of `safis`, which writes to standard error.

pub const PRELUDE: &str = r#"import sys

def hacer_menjunje(texto1, texto2):
    return texto1 + texto2

def viene_bolita(texto, indice):
    return texto[indice]

def trome(texto):
    return len(texto)

def sueltele(texto):
    print(texto)

def echandi_jiménez():
    return input()

def grítele(texto):
    return texto.upper()

def susúrrele(texto):
    return texto.lower()

def déjelo_parejo(flotante):
    return round(flotante)
"#;
