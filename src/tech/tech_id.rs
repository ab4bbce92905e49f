crate::define_id_enum! {
    /// Technology identifier, one per registry signature
    TechId {
        React => "react" : "React",
        NextJs => "nextjs" : "Next.js",
        Vue => "vue" : "Vue.js",
        Angular => "angular" : "Angular",
        Svelte => "svelte" : "Svelte",
        Tailwind => "tailwind" : "Tailwind CSS",
        Bootstrap => "bootstrap" : "Bootstrap",
        TypeScript => "typescript" : "TypeScript",
        CSharp => "csharp" : "C#",
        Python => "python" : "Python",
        NodeJs => "nodejs" : "Node.js",
        Sql => "sql" : "SQL",
        Html => "html" : "HTML",
        Css => "css" : "CSS",
    }
}
