use syn::parse::{Parse, ParseStream, Result};
use syn::{Attribute, Ident, Token, Visibility};

/// Register module header: `pub mod BLOCK NAME;`.
#[allow(missing_docs)]
pub struct RegMod {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub block: Ident,
    pub ident: Ident,
}

impl Parse for RegMod {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        input.parse::<Token![mod]>()?;
        let block = input.parse()?;
        let ident = input.parse()?;
        input.parse::<Token![;]>()?;
        Ok(Self { attrs, vis, block, ident })
    }
}
