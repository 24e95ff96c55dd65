//! Built-in résumé used when neither `RESUME_PATH` nor the request's `cvData`
//! supplies one. Injected verbatim into the persona prompt; nothing parses it.

pub const DEFAULT_RESUME: &str = "\
BRUNO PAULON - Full Stack Developer
=====================================

PERFIL:
Full Stack Developer com mais de 5 anos de experiência construindo aplicações web \
escaláveis para clientes na Europa e América Latina. Expertise em React, Node.js e \
TypeScript, usando Next.js para desenvolver soluções front-end modernas.

EXPERIÊNCIA PROFISSIONAL:

1. Software Developer - Acidados SA, Cascais (Janeiro 2025 - Presente)
- Criou dashboards e relatórios analíticos usando SQL, aumentando eficiência em 30%
- Desenvolveu APIs REST, aplicações console e interfaces em JavaScript e Node.js

2. Full Stack Engineer - Workana, Portugal Remote (Junho 2020 - Dezembro 2024)
- Liderou a entrega de 20+ projetos full-stack com 95% de satisfação
- Desenvolveu frontends com React, Next.js, Angular, TypeScript e Tailwind CSS
- Aumento médio de 20% na eficiência operacional das plataformas entregues

3. Software Developer - MiosTech, Setúbal - Portugal (Agosto 2023 - Julho 2024)
- Desenvolveu app React Native, publicado em iOS e Android, aumentando interação em 40%
- Modernizou sistema legado em Angular 8, melhorando performance em 25%
- Reduziu bugs de integração em 50%

IDIOMAS:
- Português (Nativo/Bilíngue)
- Inglês (Nativo/Bilíngue)
- Espanhol (Intermediário)
";
