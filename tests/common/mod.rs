//! Fixture results pages shared by the integration tests.

#![allow(dead_code)]

/// One organic result in the current layout.
pub fn organic_block(href: &str, title: &str, snippet: &str) -> String {
    format!(
        r#"<div class="MjjYud"><div class="g Ww4FFb" data-hveid="CAQ"><div class="tF2Cxc">
             <div class="yuRUbf"><a href="{href}" data-ved="2ahUKE"><br><h3 class="LC20lb MBeuO DKV0Md">{title}</h3>
               <div class="notranslate"><cite>{href}</cite></div></a></div>
             <div class="VwiC3b yXK7lf">{snippet}</div>
           </div></div></div>"#
    )
}

/// A text ad in the top ad region.
pub fn ad_region(href: &str, title: &str) -> String {
    format!(
        r#"<div id="tads" aria-label="Ads"><div class="uEierd"><div class="g">
             <span class="U3A9Ac">Sponsored</span>
             <a href="{href}"><h3>{title}</h3></a>
             <div class="VwiC3b">Best deals on everything you could want, shop today and save big money.</div>
           </div></div></div>"#
    )
}

/// A "People also ask" accordion with result-shaped answers inside.
pub fn people_also_ask() -> String {
    r#"<div class="MjjYud"><div class="g"><div><h2>People also ask</h2>
         <div class="related-question-pair" data-initq="What is Rust used for?">
           <div class="g"><a href="https://paa.example/answer"><h3>What is Rust used for?</h3></a>
             <div class="VwiC3b">Rust is used for systems programming, web services and embedded devices.</div></div>
         </div></div></div></div>"#
        .to_string()
}

/// A full results page around `body`.
pub fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="UTF-8"><title>rust programming - Google Search</title>
           <style>.g{{margin:0}}</style><script>window.google={{kEI:"x"}};</script></head>
           <body><div id="main"><div id="search"><h1 style="display:none">Search Results</h1>
           <div id="rso">{body}</div></div></div>
           <div id="botstuff"><div><h3>Related searches</h3><a href="/search?q=rust+tutorial">rust tutorial</a></div></div>
           </body></html>"#
    )
}

/// The two-organic-plus-one-ad page used by several scenarios.
pub fn rust_programming_page() -> String {
    let mut body = ad_region("https://www.googleadservices.com/pagead/aclk?sa=L", "Learn Rust Fast - Online Course");
    body.push_str(&organic_block(
        "https://www.rust-lang.org/",
        "Rust Programming Language",
        "A language empowering everyone to build reliable and efficient software.",
    ));
    body.push_str(&organic_block(
        "/url?q=https://en.wikipedia.org/wiki/Rust_(programming_language)&amp;sa=U&amp;ved=2ahUKE",
        "Rust (programming language) - Wikipedia",
        "Rust is a general-purpose programming language emphasizing performance, type safety, and concurrency.",
    ));
    page(&body)
}
